//! Client-side parameter interpolation.
//!
//! Renders [`SqlValue`]s as SQL literals and substitutes them for the `?`
//! placeholders of a query, so a statement can be sent over the text
//! protocol without a server-side prepare.

use crate::config::CodecConfig;
use crate::error::TypeError;
use crate::text::{append_datetime, append_naive_datetime};
use crate::value::SqlValue;

/// Append `value` to `dst` as a SQL literal.
///
/// Strings and binary values are quoted and escaped with the discipline
/// selected by `config`. Zoned datetimes are shifted into
/// `config.time_zone` first.
pub fn append_literal(
    dst: &mut Vec<u8>,
    value: &SqlValue,
    config: &CodecConfig,
) -> Result<(), TypeError> {
    match value {
        SqlValue::Null => dst.extend_from_slice(b"NULL"),
        SqlValue::Bool(v) => dst.push(if *v { b'1' } else { b'0' }),
        SqlValue::Int(v) => dst.extend_from_slice(v.to_string().as_bytes()),
        SqlValue::UInt(v) => dst.extend_from_slice(v.to_string().as_bytes()),
        SqlValue::Double(v) => append_double(dst, *v)?,
        SqlValue::Bytes(v) => {
            dst.extend_from_slice(b"_binary'");
            config.escape_mode().escape_bytes(dst, v);
            dst.push(b'\'');
        }
        SqlValue::String(v) => {
            dst.push(b'\'');
            config.escape_mode().escape_str(dst, v);
            dst.push(b'\'');
        }
        SqlValue::DateTime(v) => {
            let local = v.with_timezone(&config.time_zone);
            quoted(dst, |dst| append_datetime(dst, &local))?;
        }
        SqlValue::NaiveDateTime(v) => quoted(dst, |dst| append_naive_datetime(dst, v))?,
        SqlValue::ZeroDateTime => dst.extend_from_slice(b"'0000-00-00'"),
    }
    Ok(())
}

/// Substitute `args` for the `?` placeholders of `query`, in order.
///
/// The result is bytes rather than a `String` because binary arguments
/// are embedded verbatim.
///
/// ```
/// use mysql_types::{interpolate, CodecConfig, SqlValue};
///
/// let sql = interpolate(
///     "SELECT * FROM t WHERE id = ? AND name = ?",
///     &[SqlValue::Int(7), SqlValue::String("O'Brien".into())],
///     &CodecConfig::default(),
/// )
/// .unwrap();
/// assert_eq!(sql, b"SELECT * FROM t WHERE id = 7 AND name = 'O\\'Brien'");
/// ```
pub fn interpolate(
    query: &str,
    args: &[SqlValue],
    config: &CodecConfig,
) -> Result<Vec<u8>, TypeError> {
    let placeholders = query.bytes().filter(|&b| b == b'?').count();
    if placeholders != args.len() {
        return Err(TypeError::ParamCount {
            expected: placeholders,
            actual: args.len(),
        });
    }

    let mut buf = Vec::with_capacity(query.len() + args.len() * 8);
    let mut args = args.iter();
    let mut rest = query.as_bytes();
    while let Some(pos) = rest.iter().position(|&b| b == b'?') {
        buf.extend_from_slice(&rest[..pos]);
        rest = &rest[pos + 1..];
        if let Some(arg) = args.next() {
            append_literal(&mut buf, arg, config)?;
        }
    }
    buf.extend_from_slice(rest);

    tracing::trace!(
        placeholders = placeholders,
        length = buf.len(),
        "interpolated query"
    );
    Ok(buf)
}

fn quoted(
    dst: &mut Vec<u8>,
    body: impl FnOnce(&mut Vec<u8>) -> Result<(), TypeError>,
) -> Result<(), TypeError> {
    let start = dst.len();
    dst.push(b'\'');
    if let Err(e) = body(dst) {
        dst.truncate(start);
        return Err(e);
    }
    dst.push(b'\'');
    Ok(())
}

/// Shortest round-trip rendering, switching to exponent form for very
/// large and very small magnitudes.
fn append_double(dst: &mut Vec<u8>, v: f64) -> Result<(), TypeError> {
    if !v.is_finite() {
        return Err(TypeError::OutOfRange {
            target_type: "DOUBLE",
        });
    }
    let magnitude = v.abs();
    let text = if magnitude != 0.0 && !(1e-4..1e21).contains(&magnitude) {
        format!("{v:e}")
    } else {
        v.to_string()
    };
    dst.extend_from_slice(text.as_bytes());
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use chrono::{FixedOffset, NaiveDate, TimeZone, Utc};

    fn render(value: &SqlValue, config: &CodecConfig) -> String {
        let mut buf = Vec::new();
        append_literal(&mut buf, value, config).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_scalar_literals() {
        let config = CodecConfig::default();
        assert_eq!(render(&SqlValue::Null, &config), "NULL");
        assert_eq!(render(&SqlValue::Bool(true), &config), "1");
        assert_eq!(render(&SqlValue::Bool(false), &config), "0");
        assert_eq!(render(&SqlValue::Int(-42), &config), "-42");
        assert_eq!(render(&SqlValue::UInt(u64::MAX), &config), "18446744073709551615");
    }

    #[test]
    fn test_double_literals() {
        let config = CodecConfig::default();
        assert_eq!(render(&SqlValue::Double(0.0), &config), "0");
        assert_eq!(render(&SqlValue::Double(1.5), &config), "1.5");
        assert_eq!(render(&SqlValue::Double(-0.25), &config), "-0.25");
        assert_eq!(render(&SqlValue::Double(1e21), &config), "1e21");
        assert_eq!(render(&SqlValue::Double(1.5e-7), &config), "1.5e-7");

        let mut buf = Vec::new();
        assert!(append_literal(&mut buf, &SqlValue::Double(f64::INFINITY), &config).is_err());
    }

    #[test]
    fn test_string_literals_follow_escape_mode() {
        let value = SqlValue::String("it's a \\ test".into());
        let backslash = CodecConfig::default();
        assert_eq!(render(&value, &backslash), "'it\\'s a \\\\ test'");

        let quotes = CodecConfig::new().no_backslash_escapes(true);
        assert_eq!(render(&value, &quotes), "'it''s a \\ test'");
    }

    #[test]
    fn test_binary_literal() {
        let value = SqlValue::Bytes(Bytes::from_static(b"a\x00'"));
        let mut buf = Vec::new();
        append_literal(&mut buf, &value, &CodecConfig::default()).unwrap();
        assert_eq!(buf, b"_binary'a\\0\\''");
    }

    #[test]
    fn test_datetime_literal_uses_session_zone() {
        let t = Utc.with_ymd_and_hms(2020, 5, 13, 21, 30, 45).unwrap();
        let value = SqlValue::DateTime(t.fixed_offset());

        assert_eq!(
            render(&value, &CodecConfig::default()),
            "'2020-05-13 21:30:45'"
        );
        let tokyo = CodecConfig::new().time_zone(FixedOffset::east_opt(9 * 3600).unwrap());
        assert_eq!(render(&value, &tokyo), "'2020-05-14 06:30:45'");
    }

    #[test]
    fn test_naive_and_zero_datetime_literals() {
        let config = CodecConfig::new().time_zone(FixedOffset::east_opt(3600).unwrap());
        let date = NaiveDate::from_ymd_opt(2020, 5, 13).unwrap();
        assert_eq!(
            render(&SqlValue::NaiveDateTime(date.and_hms_opt(0, 0, 0).unwrap()), &config),
            "'2020-05-13'"
        );
        assert_eq!(
            render(&SqlValue::NaiveDateTime(date.and_hms_milli_opt(1, 2, 3, 400).unwrap()), &config),
            "'2020-05-13 01:02:03.400'"
        );
        assert_eq!(render(&SqlValue::ZeroDateTime, &config), "'0000-00-00'");
    }

    #[test]
    fn test_out_of_range_datetime_leaves_buffer() {
        let date = NaiveDate::from_ymd_opt(10000, 1, 1).unwrap();
        let mut buf = b"x=".to_vec();
        let err = append_literal(
            &mut buf,
            &SqlValue::NaiveDateTime(date.and_hms_opt(0, 0, 0).unwrap()),
            &CodecConfig::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            TypeError::OutOfRange {
                target_type: "DATETIME"
            }
        );
        assert_eq!(buf, b"x=");
    }

    #[test]
    fn test_interpolate() {
        let sql = interpolate(
            "INSERT INTO t VALUES (?, ?, ?)",
            &[
                SqlValue::Null,
                SqlValue::UInt(3),
                SqlValue::String("a\nb".into()),
            ],
            &CodecConfig::default(),
        )
        .unwrap();
        assert_eq!(sql, b"INSERT INTO t VALUES (NULL, 3, 'a\\nb')");
    }

    #[test]
    fn test_interpolate_without_placeholders() {
        let sql = interpolate("SELECT 1", &[], &CodecConfig::default()).unwrap();
        assert_eq!(sql, b"SELECT 1");
    }

    #[test]
    fn test_interpolate_count_mismatch() {
        let err = interpolate("SELECT ?, ?", &[SqlValue::Int(1)], &CodecConfig::default())
            .unwrap_err();
        assert_eq!(
            err,
            TypeError::ParamCount {
                expected: 2,
                actual: 1
            }
        );
        assert!(interpolate("SELECT 1", &[SqlValue::Null], &CodecConfig::default()).is_err());
    }
}
