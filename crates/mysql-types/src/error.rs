//! Type conversion error types.

use mysql_protocol::{ColumnType, ProtocolError};
use thiserror::Error;

/// Field boundary after which a datetime separator was expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// `-` after the year.
    Year,
    /// `-` after the month.
    Month,
    /// ` ` after the day.
    Date,
    /// `:` after the hour.
    Hour,
    /// `:` after the minute.
    Minute,
    /// `.` after the second.
    Second,
}

/// Errors that can occur during type conversion.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TypeError {
    /// Wire-level decoding failed.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Datetime text whose length matches no accepted layout.
    #[error("invalid time bytes: {0}")]
    InvalidTimeBytes(String),

    /// A non-digit where the datetime grammar expects a digit.
    #[error("not [0-9]")]
    NotDigit,

    /// An unexpected separator in datetime text.
    #[error("bad value for field: `{}`", char::from(*.byte))]
    BadFieldValue {
        /// The offending byte.
        byte: u8,
        /// The field the separator should have closed.
        field: Field,
    },

    /// Calendar construction rejected the parsed fields.
    #[error("invalid date/time: {0}")]
    InvalidDateTime(String),

    /// Value is out of range for target type.
    #[error("value out of range for {target_type}")]
    OutOfRange {
        /// Target type name.
        target_type: &'static str,
    },

    /// Requested rendering length not valid for the column kind.
    #[error("illegal {kind} length {length}")]
    IllegalLength {
        /// `DATE`, `DATETIME` or `TIME`.
        kind: &'static str,
        /// Requested output length.
        length: u8,
    },

    /// Raw temporal payload length not defined by the protocol.
    #[error("illegal {kind} packet length {length}")]
    IllegalPacketLength {
        /// `DATE`, `DATETIME` or `TIME`.
        kind: &'static str,
        /// Raw payload length.
        length: usize,
    },

    /// Column `decimals` value outside the fractional-second range.
    #[error("protocol error, illegal decimals value {0}")]
    IllegalDecimals(u8),

    /// Column type has no temporal representation.
    #[error("unsupported column type {0:?}")]
    UnsupportedColumnType(ColumnType),

    /// Number of `?` placeholders differs from the number of arguments.
    #[error("placeholder count mismatch: query has {expected}, got {actual} arguments")]
    ParamCount {
        /// Placeholders in the query.
        expected: usize,
        /// Arguments supplied.
        actual: usize,
    },

    /// Configuration parameter with an unknown key or unusable value.
    #[error("invalid value for parameter {key}: {value}")]
    InvalidParam {
        /// Parameter name.
        key: String,
        /// Rejected value.
        value: String,
    },
}
