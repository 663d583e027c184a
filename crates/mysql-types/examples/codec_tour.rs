//! Walk through the codec on a few representative values.
//!
//! # Running
//!
//! ```bash
//! cargo run -p mysql-types --example codec_tour
//! ```

// Allow common patterns in example code
#![allow(clippy::unwrap_used, clippy::expect_used)]

use bytes::{Bytes, BytesMut};
use chrono::{FixedOffset, TimeZone};
use mysql_protocol::{ColumnType, write_lenenc_bytes};
use mysql_types::{
    CodecConfig, DateTimeValue, SqlValue, ToSql, TypeError, decode_binary_temporal,
    format_time_millis, interpolate, parse_datetime,
};

fn main() -> Result<(), TypeError> {
    tracing_subscriber::fmt::init();

    // A binary row with a DATETIME(6) and a TIME(2) column.
    let mut buf = BytesMut::new();
    write_lenenc_bytes(
        &mut buf,
        &[0xE4, 0x07, 5, 13, 21, 30, 45, 0x40, 0xE2, 0x01, 0x00],
    );
    write_lenenc_bytes(&mut buf, &[1, 2, 0, 0, 0, 3, 4, 5, 0x40, 0xE2, 0x01, 0x00]);
    let mut row: Bytes = buf.freeze();

    let datetime = decode_binary_temporal(&mut row, ColumnType::DateTime, 6)?;
    let time = decode_binary_temporal(&mut row, ColumnType::Time, 2)?;
    println!("binary DATETIME(6): {datetime:?}");
    println!("binary TIME(2):     {time:?}");

    // Text-protocol values parsed in a session time zone.
    let config = CodecConfig::from_params("parseTime=true&loc=+09:00")?;
    for text in [&b"2020-05-13 21:30:45.5"[..], b"0000-00-00"] {
        match parse_datetime(text, &config.time_zone)? {
            DateTimeValue::Zero => println!("parsed zero date"),
            DateTimeValue::At(t) => println!("parsed {t}"),
        }
    }
    if let Err(e) = parse_datetime(b"2020-02-30", &config.time_zone) {
        println!("rejected: {e}");
    }

    // Client-side interpolation.
    let when = FixedOffset::east_opt(0)
        .unwrap()
        .with_ymd_and_hms(2020, 5, 13, 12, 0, 0)
        .unwrap();
    let args: Vec<SqlValue> = [&"O'Brien" as &dyn ToSql, &when, &Option::<i32>::None]
        .iter()
        .map(|v| v.to_sql())
        .collect::<Result<_, _>>()?;
    let sql = interpolate("INSERT INTO people VALUES (?, ?, ?)", &args, &config)?;
    println!("{}", String::from_utf8_lossy(&sql));

    println!("epoch millis 1653055405: {}", format_time_millis(1_653_055_405));
    Ok(())
}
