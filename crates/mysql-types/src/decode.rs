//! Binary-protocol temporal decoding.
//!
//! Binary result-set rows carry DATE, DATETIME and TIMESTAMP values as a
//! truncated little-endian struct, and TIME values as a signed interval.
//! The server drops trailing zero subfields, so the payload length varies:
//!
//! | Kind        | Raw length | Layout                                              |
//! |-------------|------------|-----------------------------------------------------|
//! | date family | 0          | zero value                                          |
//! | date family | 4          | year (u16), month, day                              |
//! | date family | 7          | ... hour, minute, second                            |
//! | date family | 11         | ... microsecond (u32)                               |
//! | TIME        | 0          | zero interval                                       |
//! | TIME        | 8          | sign, days (u32), hour, minute, second              |
//! | TIME        | 12         | ... microsecond (u32)                               |
//!
//! The requested output length, derived from the column's `decimals`,
//! decides which text form is produced. Subfields the payload omits render
//! as zeros.

use std::fmt;

use bytes::Buf;
use mysql_protocol::{ColumnType, read_lenenc_bytes};

use crate::error::TypeError;

/// Text of the zero datetime at full microsecond precision.
const ZERO_DATETIME: &str = "0000-00-00 00:00:00.000000";

/// Text of the zero interval at full microsecond precision.
const ZERO_TIME: &str = "00:00:00.000000";

/// Decimals value the server sends when a column has no fixed precision.
const DECIMALS_UNSPECIFIED: u8 = 0x1F;

/// A MySQL TIME value.
///
/// TIME is a signed duration, not a time of day: it may be negative and
/// may exceed 24 hours.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MySqlTime {
    /// Interval is negative.
    pub negative: bool,
    /// Whole days.
    pub days: u32,
    /// Hours within the day.
    pub hours: u8,
    /// Minutes.
    pub minutes: u8,
    /// Seconds.
    pub seconds: u8,
    /// Microseconds.
    pub microseconds: u32,
}

impl MySqlTime {
    /// Decode the 0, 8 or 12 byte binary TIME layout.
    pub fn from_binary(raw: &[u8]) -> Result<Self, TypeError> {
        match raw.len() {
            0 => Ok(Self::default()),
            8 | 12 => {
                let microseconds = if raw.len() == 12 {
                    read_u32_le(&raw[8..12])
                } else {
                    0
                };
                Ok(Self {
                    negative: raw[0] != 0,
                    days: read_u32_le(&raw[1..5]),
                    hours: raw[5],
                    minutes: raw[6],
                    seconds: raw[7],
                    microseconds,
                })
            }
            length => Err(TypeError::IllegalPacketLength {
                kind: "TIME",
                length,
            }),
        }
    }

    /// Hours with whole days folded in.
    #[must_use]
    pub fn total_hours(&self) -> u64 {
        u64::from(self.days) * 24 + u64::from(self.hours)
    }

    /// Append `[-]HH:MM:SS` followed by `fraction_digits` fraction digits.
    ///
    /// The hour component uses at least two digits and grows as needed.
    /// Fraction digits beyond six are not produced.
    fn write_text(&self, out: &mut String, fraction_digits: usize) {
        if self.negative {
            out.push('-');
        }
        out.push_str(&format!(
            "{:02}:{:02}:{:02}",
            self.total_hours(),
            self.minutes,
            self.seconds
        ));
        push_fraction(out, self.microseconds, fraction_digits);
    }
}

impl fmt::Display for MySqlTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::with_capacity(16);
        let digits = if self.microseconds == 0 { 0 } else { 6 };
        self.write_text(&mut out, digits);
        f.write_str(&out)
    }
}

/// Format a binary DATE/DATETIME/TIMESTAMP payload as text.
///
/// `out_len` selects the form: 10 for `YYYY-MM-DD`, 19 for
/// `YYYY-MM-DD HH:MM:SS`, and 21 to 26 for a datetime with
/// `out_len - 20` fraction digits.
pub fn format_binary_datetime(raw: &[u8], out_len: u8) -> Result<String, TypeError> {
    let kind = if out_len > 10 { "DATETIME" } else { "DATE" };
    if !matches!(out_len, 10 | 19 | 21..=26) {
        return Err(TypeError::IllegalLength {
            kind,
            length: out_len,
        });
    }

    let out_len = usize::from(out_len);
    if raw.is_empty() {
        return Ok(ZERO_DATETIME[..out_len].to_string());
    }
    if !matches!(raw.len(), 4 | 7 | 11) {
        return Err(TypeError::IllegalPacketLength {
            kind,
            length: raw.len(),
        });
    }

    let mut out = String::with_capacity(out_len);
    let year = u16::from_le_bytes([raw[0], raw[1]]);
    out.push_str(&format!("{year:04}-{:02}-{:02}", raw[2], raw[3]));
    if out_len == 10 {
        return Ok(out);
    }
    if raw.len() == 4 {
        out.push_str(&ZERO_DATETIME[10..out_len]);
        return Ok(out);
    }

    out.push_str(&format!(" {:02}:{:02}:{:02}", raw[4], raw[5], raw[6]));
    if out_len == 19 {
        return Ok(out);
    }
    if raw.len() == 7 {
        out.push_str(&ZERO_DATETIME[19..out_len]);
        return Ok(out);
    }

    push_fraction(&mut out, read_u32_le(&raw[7..11]), out_len - 20);
    Ok(out)
}

/// Format a binary TIME payload as text.
///
/// `out_len` is the length of the zero value: 8 for `HH:MM:SS`, or 10 to 15
/// for `HH:MM:SS` with `out_len - 9` fraction digits. Negative intervals
/// and intervals of 100 hours or more render longer than `out_len`.
pub fn format_binary_time(raw: &[u8], out_len: u8) -> Result<String, TypeError> {
    if !matches!(out_len, 8 | 10..=15) {
        return Err(TypeError::IllegalLength {
            kind: "TIME",
            length: out_len,
        });
    }

    let out_len = usize::from(out_len);
    if raw.is_empty() {
        return Ok(ZERO_TIME[..out_len].to_string());
    }

    let time = MySqlTime::from_binary(raw)?;
    let mut out = String::with_capacity(out_len + 2);
    time.write_text(&mut out, out_len.saturating_sub(9));
    Ok(out)
}

/// Output length for a temporal column given its `decimals` metadata.
pub fn binary_temporal_len(column_type: ColumnType, decimals: u8) -> Result<u8, TypeError> {
    match column_type {
        ColumnType::Date | ColumnType::NewDate => Ok(10),
        ColumnType::Time => match decimals {
            0 | DECIMALS_UNSPECIFIED => Ok(8),
            1..=6 => Ok(9 + decimals),
            _ => Err(TypeError::IllegalDecimals(decimals)),
        },
        ColumnType::DateTime | ColumnType::Timestamp => match decimals {
            0 | DECIMALS_UNSPECIFIED => Ok(19),
            1..=6 => Ok(20 + decimals),
            _ => Err(TypeError::IllegalDecimals(decimals)),
        },
        other => Err(TypeError::UnsupportedColumnType(other)),
    }
}

/// Decode one temporal field of a binary result-set row.
///
/// Reads the length-prefixed payload from `src` and renders it according to
/// the column's type and `decimals`. Returns `None` for a NULL prefix.
pub fn decode_binary_temporal(
    src: &mut impl Buf,
    column_type: ColumnType,
    decimals: u8,
) -> Result<Option<String>, TypeError> {
    let out_len = binary_temporal_len(column_type, decimals)?;
    let Some(raw) = read_lenenc_bytes(src)? else {
        return Ok(None);
    };

    let result = if column_type == ColumnType::Time {
        format_binary_time(&raw, out_len)
    } else {
        format_binary_datetime(&raw, out_len)
    };

    match result {
        Ok(text) => {
            tracing::trace!(
                column_type = ?column_type,
                raw_len = raw.len(),
                out_len = out_len,
                "decoded binary temporal"
            );
            Ok(Some(text))
        }
        Err(e) => {
            tracing::debug!(
                column_type = ?column_type,
                raw_len = raw.len(),
                out_len = out_len,
                error = %e,
                "rejected binary temporal"
            );
            Err(e)
        }
    }
}

/// Append `.` and the first `digits` digits of the six-digit microsecond
/// rendering. Nothing is appended when `digits` is zero.
fn push_fraction(out: &mut String, microseconds: u32, digits: usize) {
    if digits == 0 {
        return;
    }
    let micros = format!("{:06}", microseconds % 1_000_000);
    out.push('.');
    out.push_str(&micros[..digits.min(6)]);
}

fn read_u32_le(b: &[u8]) -> u32 {
    u32::from_le_bytes([b[0], b[1], b[2], b[3]])
}
