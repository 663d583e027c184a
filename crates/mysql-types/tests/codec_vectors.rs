//! End-to-end codec tests.
//!
//! Exercises the public API the way a row reader and a statement writer
//! use it:
//! - binary result-set rows with temporal columns
//! - text-protocol temporal columns under different session settings
//! - query interpolation with every literal kind

#![allow(clippy::unwrap_used, clippy::expect_used)]

use bytes::{BufMut, Bytes, BytesMut};
use chrono::{FixedOffset, NaiveDate, TimeZone, Utc};
use mysql_protocol::{ColumnType, encode_lenenc_int, write_lenenc_bytes};
use mysql_types::{
    CodecConfig, DateTimeValue, SqlValue, TextTemporal, ToSql, TypeError, decode_binary_temporal,
    format_datetime, interpolate, parse_datetime,
};

// ============================================================================
// Binary Result-Set Rows
// ============================================================================

mod binary_rows {
    use super::*;

    /// DATETIME(3), TIME(0), DATE, NULL DATETIME.
    fn sample_row() -> Bytes {
        let mut buf = BytesMut::new();

        let mut datetime = BytesMut::new();
        datetime.put_u16_le(2020);
        datetime.put_slice(&[5, 13, 21, 30, 45]);
        datetime.put_u32_le(123_456);
        write_lenenc_bytes(&mut buf, &datetime);

        let mut time = BytesMut::new();
        time.put_u8(1);
        time.put_u32_le(2);
        time.put_slice(&[3, 4, 5]);
        write_lenenc_bytes(&mut buf, &time);

        write_lenenc_bytes(&mut buf, &[0xE4, 0x07, 1, 31]);
        buf.put_u8(0xFB);
        buf.freeze()
    }

    #[test]
    fn test_decode_row_in_order() {
        let mut row = sample_row();

        let datetime = decode_binary_temporal(&mut row, ColumnType::DateTime, 3).unwrap();
        assert_eq!(datetime.as_deref(), Some("2020-05-13 21:30:45.123"));

        let time = decode_binary_temporal(&mut row, ColumnType::Time, 0).unwrap();
        assert_eq!(time.as_deref(), Some("-51:04:05"));

        let date = decode_binary_temporal(&mut row, ColumnType::Date, 0).unwrap();
        assert_eq!(date.as_deref(), Some("2020-01-31"));

        let null = decode_binary_temporal(&mut row, ColumnType::Timestamp, 0).unwrap();
        assert_eq!(null, None);

        assert!(row.is_empty());
    }

    #[test]
    fn test_zero_length_payloads() {
        let mut row = Bytes::from_static(&[0x00, 0x00, 0x00]);
        assert_eq!(
            decode_binary_temporal(&mut row, ColumnType::DateTime, 6).unwrap().as_deref(),
            Some("0000-00-00 00:00:00.000000")
        );
        assert_eq!(
            decode_binary_temporal(&mut row, ColumnType::Time, 2).unwrap().as_deref(),
            Some("00:00:00.00")
        );
        assert_eq!(
            decode_binary_temporal(&mut row, ColumnType::NewDate, 0x1F).unwrap().as_deref(),
            Some("0000-00-00")
        );
    }

    #[test]
    fn test_truncated_row() {
        let mut buf = BytesMut::new();
        encode_lenenc_int(11, &mut buf);
        buf.put_slice(&[0xE4, 0x07, 1]);
        let mut row = buf.freeze();

        let err = decode_binary_temporal(&mut row, ColumnType::DateTime, 0).unwrap_err();
        assert!(matches!(err, TypeError::Protocol(_)));
    }

    #[test]
    fn test_bad_payload_length() {
        let mut row = Bytes::from_static(&[0x05, 1, 2, 3, 4, 5]);
        let err = decode_binary_temporal(&mut row, ColumnType::DateTime, 0).unwrap_err();
        assert_eq!(
            err,
            TypeError::IllegalPacketLength {
                kind: "DATETIME",
                length: 5
            }
        );
    }

    #[test]
    fn test_non_temporal_column() {
        let mut row = Bytes::from_static(&[0x01, 0x31]);
        let err = decode_binary_temporal(&mut row, ColumnType::VarString, 0).unwrap_err();
        assert_eq!(err, TypeError::UnsupportedColumnType(ColumnType::VarString));
    }
}

// ============================================================================
// Text Protocol Temporal Columns
// ============================================================================

mod text_columns {
    use super::*;

    #[test]
    fn test_parse_time_from_params() {
        let config = CodecConfig::from_params("parseTime=true&loc=-03:00").unwrap();
        let tz = FixedOffset::west_opt(3 * 3600).unwrap();

        let value = config
            .decode_text_temporal(ColumnType::Timestamp, b"1999-12-31 23:59:59.5")
            .unwrap();
        let expected = tz
            .from_local_datetime(
                &NaiveDate::from_ymd_opt(1999, 12, 31)
                    .unwrap()
                    .and_hms_milli_opt(23, 59, 59, 500)
                    .unwrap(),
            )
            .unwrap();
        assert_eq!(value, TextTemporal::Parsed(DateTimeValue::At(expected)));
    }

    #[test]
    fn test_zero_dates_survive() {
        let config = CodecConfig::new().parse_time(true);
        for text in [
            &b"0000-00-00"[..],
            b"0000-00-00 00:00:00",
            b"0000-00-00 00:00:00.0",
            b"0000-00-00 00:00:00.000000",
        ] {
            assert_eq!(
                config.decode_text_temporal(ColumnType::DateTime, text).unwrap(),
                TextTemporal::Parsed(DateTimeValue::Zero)
            );
        }
    }

    #[test]
    fn test_format_then_parse() {
        let t = Utc.with_ymd_and_hms(2038, 1, 19, 3, 14, 7).unwrap();
        let text = format_datetime(&t).unwrap();
        assert_eq!(text, "2038-01-19 03:14:07");
        assert_eq!(
            parse_datetime(text.as_bytes(), &Utc).unwrap(),
            DateTimeValue::At(t)
        );
    }

    #[test]
    fn test_parse_error_messages() {
        let cases: &[(&[u8], &str)] = &[
            (b"2020-05-1", "invalid time bytes: 2020-05-1"),
            (b"2020-05-1x", "not [0-9]"),
            (b"2020/05/13", "bad value for field: `/`"),
        ];
        for &(input, message) in cases {
            let err = parse_datetime(input, &Utc).unwrap_err();
            assert_eq!(err.to_string(), message);
        }
    }
}

// ============================================================================
// Query Interpolation
// ============================================================================

mod interpolation {
    use super::*;

    #[test]
    fn test_mixed_arguments() {
        let when = FixedOffset::east_opt(2 * 3600)
            .unwrap()
            .with_ymd_and_hms(2021, 3, 4, 10, 0, 0)
            .unwrap();
        let blob: &[u8] = b"\x1a\x00";
        let name: Option<&str> = None;
        let params: [&dyn ToSql; 8] = [&1u8, &-2i64, &true, &0.5f64, &"x'y", &blob, &name, &when];
        let values: Vec<SqlValue> = params.iter().map(|v| v.to_sql().unwrap()).collect();

        let sql = interpolate(
            "INSERT INTO t VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            &values,
            &CodecConfig::default(),
        )
        .unwrap();
        assert_eq!(
            sql,
            b"INSERT INTO t VALUES (1, -2, 1, 0.5, 'x\\'y', _binary'\\Z\\0', NULL, '2021-03-04 08:00:00')"
        );
    }

    #[test]
    fn test_no_backslash_escapes_session() {
        let config = CodecConfig::from_params("noBackslashEscapes=1").unwrap();
        let sql = interpolate(
            "SELECT ?",
            &[SqlValue::String("C:\\temp\\it's".into())],
            &config,
        )
        .unwrap();
        assert_eq!(sql, b"SELECT 'C:\\temp\\it''s'");
    }

    #[test]
    fn test_zero_datetime_argument() {
        let zero = DateTimeValue::<Utc>::Zero.to_sql().unwrap();
        let sql = interpolate("UPDATE t SET d = ?", &[zero], &CodecConfig::default()).unwrap();
        assert_eq!(sql, b"UPDATE t SET d = '0000-00-00'");
    }

    #[test]
    fn test_failed_argument_aborts() {
        let far = NaiveDate::from_ymd_opt(12_000, 1, 1).unwrap();
        let err = interpolate(
            "SELECT ?, ?",
            &[SqlValue::Int(1), far.to_sql().unwrap()],
            &CodecConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, TypeError::OutOfRange { .. }));
    }
}
