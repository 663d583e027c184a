//! # mysql-types
//!
//! MySQL value conversions between wire forms and Rust types.
//!
//! This crate turns the temporal payloads of binary result sets into their
//! canonical text, renders and parses the `YYYY-MM-DD HH:MM:SS[.fraction]`
//! datetime form, escapes strings for single-quoted literals, and
//! interpolates query arguments for the text protocol.
//!
//! ## Type Mappings
//!
//! | MySQL Type | Rust Type |
//! |------------|-----------|
//! | `TINYINT`..`BIGINT` | `i8`..`i64`, `u8`..`u64` |
//! | `FLOAT`/`DOUBLE` | `f32`/`f64` |
//! | `CHAR`/`VARCHAR`/`TEXT` | `String` |
//! | `BINARY`/`VARBINARY`/`BLOB` | `Vec<u8>`, `bytes::Bytes` |
//! | `DATE`/`DATETIME`/`TIMESTAMP` | `chrono::DateTime`, [`DateTimeValue`] |
//! | `TIME` | [`MySqlTime`] |
//!
//! ## Zero dates
//!
//! `0000-00-00` is a legal MySQL value that matches no calendar point. The
//! parser returns it as [`DateTimeValue::Zero`] rather than as an error.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod config;
pub mod decode;
pub mod epoch;
pub mod error;
pub mod escape;
pub mod literal;
pub mod text;
pub mod to_sql;
pub mod value;

pub use config::{CodecConfig, TextTemporal, read_bool};
pub use decode::{
    MySqlTime, binary_temporal_len, decode_binary_temporal, format_binary_datetime,
    format_binary_time,
};
pub use epoch::{format_date_millis, format_time_millis};
pub use error::{Field, TypeError};
pub use escape::{
    EscapeMode, escape_bytes_backslash, escape_bytes_quotes, escape_str_backslash,
    escape_str_quotes,
};
pub use literal::{append_literal, interpolate};
pub use text::{append_datetime, append_naive_datetime, format_datetime, parse_datetime};
pub use to_sql::ToSql;
pub use value::{DateTimeValue, SqlValue};
