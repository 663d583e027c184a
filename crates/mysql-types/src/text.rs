//! Canonical datetime text.
//!
//! MySQL exchanges DATE, DATETIME and TIMESTAMP values in text form as
//! `YYYY-MM-DD[ HH:MM:SS[.fraction]]`. This module renders chrono values in
//! that form and parses it back with a strict, position-driven state
//! machine.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Timelike};

use crate::error::{Field, TypeError};
use crate::value::DateTimeValue;

/// The zero datetime at full microsecond precision.
///
/// Any prefix of this text with a valid layout length is the zero sentinel.
const ZERO_DATETIME: &[u8] = b"0000-00-00 00:00:00.000000";

/// Append the canonical text of `t`, taken in its own time zone.
///
/// The time component is emitted only when some part of it is nonzero, and
/// the fraction uses the fewest 3-digit groups that represent the
/// nanoseconds exactly. Years outside `1..=9999` are rejected and leave
/// `dst` untouched.
pub fn append_datetime<Tz: TimeZone>(dst: &mut Vec<u8>, t: &DateTime<Tz>) -> Result<(), TypeError> {
    append_naive_datetime(dst, &t.naive_local())
}

/// Append the canonical text of a zone-less datetime.
pub fn append_naive_datetime(dst: &mut Vec<u8>, t: &NaiveDateTime) -> Result<(), TypeError> {
    let year = t.year();
    if !(1..=9999).contains(&year) {
        return Err(TypeError::OutOfRange {
            target_type: "DATETIME",
        });
    }

    dst.extend_from_slice(format!("{year:04}-{:02}-{:02}", t.month(), t.day()).as_bytes());

    // Leap seconds are folded into the last regular second.
    let nanos = t.nanosecond() % 1_000_000_000;
    let (hour, minute, second) = (t.hour(), t.minute(), t.second());
    if hour == 0 && minute == 0 && second == 0 && nanos == 0 {
        return Ok(());
    }

    dst.extend_from_slice(format!(" {hour:02}:{minute:02}:{second:02}").as_bytes());
    if nanos == 0 {
        return Ok(());
    }

    let fraction = if nanos % 1_000_000 == 0 {
        format!(".{:03}", nanos / 1_000_000)
    } else if nanos % 1_000 == 0 {
        format!(".{:06}", nanos / 1_000)
    } else {
        format!(".{nanos:09}")
    };
    dst.extend_from_slice(fraction.as_bytes());
    Ok(())
}

/// Render `t` as canonical datetime text.
pub fn format_datetime<Tz: TimeZone>(t: &DateTime<Tz>) -> Result<String, TypeError> {
    let mut buf = Vec::with_capacity(29);
    append_datetime(&mut buf, t)?;
    // Only ASCII digits and separators are written.
    Ok(buf.into_iter().map(char::from).collect())
}

/// Parser states, in the order they occur in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Year,
    DashAfterYear,
    Month,
    DashAfterMonth,
    Day,
    SpaceAfterDate,
    Hour,
    ColonAfterHour,
    Minute,
    ColonAfterMinute,
    Second,
    DotAfterSecond,
    Fraction,
    Done,
}

/// What a state consumes from the input.
#[derive(Debug, Clone, Copy)]
enum Expect {
    /// Exactly this many ASCII digits.
    Digits(usize),
    /// One to six ASCII digits, to the end of the input.
    FractionDigits,
    /// One specific separator byte, closing the given field.
    Separator(u8, Field),
}

impl State {
    const fn expect(self) -> Option<Expect> {
        match self {
            Self::Year => Some(Expect::Digits(4)),
            Self::DashAfterYear => Some(Expect::Separator(b'-', Field::Year)),
            Self::Month => Some(Expect::Digits(2)),
            Self::DashAfterMonth => Some(Expect::Separator(b'-', Field::Month)),
            Self::Day => Some(Expect::Digits(2)),
            Self::SpaceAfterDate => Some(Expect::Separator(b' ', Field::Date)),
            Self::Hour => Some(Expect::Digits(2)),
            Self::ColonAfterHour => Some(Expect::Separator(b':', Field::Hour)),
            Self::Minute => Some(Expect::Digits(2)),
            Self::ColonAfterMinute => Some(Expect::Separator(b':', Field::Minute)),
            Self::Second => Some(Expect::Digits(2)),
            Self::DotAfterSecond => Some(Expect::Separator(b'.', Field::Second)),
            Self::Fraction => Some(Expect::FractionDigits),
            Self::Done => None,
        }
    }

    const fn next(self) -> Self {
        match self {
            Self::Year => Self::DashAfterYear,
            Self::DashAfterYear => Self::Month,
            Self::Month => Self::DashAfterMonth,
            Self::DashAfterMonth => Self::Day,
            Self::Day => Self::SpaceAfterDate,
            Self::SpaceAfterDate => Self::Hour,
            Self::Hour => Self::ColonAfterHour,
            Self::ColonAfterHour => Self::Minute,
            Self::Minute => Self::ColonAfterMinute,
            Self::ColonAfterMinute => Self::Second,
            Self::Second => Self::DotAfterSecond,
            Self::DotAfterSecond => Self::Fraction,
            Self::Fraction | Self::Done => Self::Done,
        }
    }

    /// The input may end before this state.
    const fn accepts_end(self) -> bool {
        matches!(self, Self::SpaceAfterDate | Self::DotAfterSecond | Self::Done)
    }
}

/// Fields collected while parsing.
#[derive(Debug, Default)]
struct Parsed {
    year: u32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
    micros: u32,
}

impl Parsed {
    fn store(&mut self, state: State, value: u32) {
        match state {
            State::Year => self.year = value,
            State::Month => self.month = value,
            State::Day => self.day = value,
            State::Hour => self.hour = value,
            State::Minute => self.minute = value,
            State::Second => self.second = value,
            State::Fraction => self.micros = value,
            _ => {}
        }
    }

    fn to_naive(&self) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(self.year as i32, self.month, self.day)?.and_hms_nano_opt(
            self.hour,
            self.minute,
            self.second,
            self.micros * 1_000,
        )
    }
}

fn digit(b: u8) -> Result<u32, TypeError> {
    if b.is_ascii_digit() {
        Ok(u32::from(b - b'0'))
    } else {
        Err(TypeError::NotDigit)
    }
}

/// Consume the input for one state, returning the parsed number (for digit
/// states) and the bytes consumed.
fn consume(expect: Expect, input: &[u8]) -> Result<(Option<u32>, usize), TypeError> {
    match expect {
        Expect::Digits(n) => {
            let mut value = 0;
            for &b in &input[..n] {
                value = value * 10 + digit(b)?;
            }
            Ok((Some(value), n))
        }
        Expect::FractionDigits => {
            // Right-pad to six digits: ".1" is 100000 microseconds.
            let mut value = 0;
            let mut scale = 100_000;
            for &b in input {
                value += digit(b)? * scale;
                scale /= 10;
            }
            Ok((Some(value), input.len()))
        }
        Expect::Separator(sep, field) => match input[0] {
            b if b == sep => Ok((None, 1)),
            byte => Err(TypeError::BadFieldValue { byte, field }),
        },
    }
}

/// Parse canonical datetime text into a value in time zone `tz`.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS` and
/// `YYYY-MM-DD HH:MM:SS.f` with one to six fraction digits. The all-zero
/// date and datetime parse to [`DateTimeValue::Zero`]. Calendar legality is
/// left to chrono: impossible dates fail with
/// [`TypeError::InvalidDateTime`], and a local time that falls in a
/// time-zone gap is rejected the same way.
pub fn parse_datetime<Tz: TimeZone>(b: &[u8], tz: &Tz) -> Result<DateTimeValue<Tz>, TypeError> {
    if !matches!(b.len(), 10 | 19 | 21..=26) {
        return Err(invalid_time_bytes(b));
    }
    if b == &ZERO_DATETIME[..b.len()] {
        return Ok(DateTimeValue::Zero);
    }

    let mut parsed = Parsed::default();
    let mut state = State::Year;
    let mut pos = 0;
    while let Some(expect) = state.expect() {
        if pos == b.len() {
            break;
        }
        let (value, used) = consume(expect, &b[pos..])?;
        if let Some(value) = value {
            parsed.store(state, value);
        }
        pos += used;
        state = state.next();
    }
    if !state.accepts_end() {
        return Err(invalid_time_bytes(b));
    }

    let naive = parsed
        .to_naive()
        .ok_or_else(|| TypeError::InvalidDateTime(String::from_utf8_lossy(b).into_owned()))?;
    tz.from_local_datetime(&naive)
        .earliest()
        .map(DateTimeValue::At)
        .ok_or_else(|| TypeError::InvalidDateTime(String::from_utf8_lossy(b).into_owned()))
}

fn invalid_time_bytes(b: &[u8]) -> TypeError {
    tracing::debug!(len = b.len(), "datetime text has no valid layout");
    TypeError::InvalidTimeBytes(String::from_utf8_lossy(b).into_owned())
}
