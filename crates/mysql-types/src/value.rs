//! SQL value representation.

use bytes::Bytes;
use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};

/// A parsed DATE/DATETIME/TIMESTAMP value.
///
/// MySQL uses the all-zero date `0000-00-00` to mean "no date". It is a
/// valid value, distinct from every calendar point, so it gets its own
/// variant instead of an error or a `None`.
#[derive(Debug, Clone, PartialEq)]
pub enum DateTimeValue<Tz: TimeZone> {
    /// The zero date or zero datetime.
    Zero,
    /// A calendar point.
    At(DateTime<Tz>),
}

impl<Tz: TimeZone> DateTimeValue<Tz> {
    /// Check if this is the zero sentinel.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        matches!(self, Self::Zero)
    }

    /// Get the calendar point, if this is not the zero sentinel.
    #[must_use]
    pub fn as_datetime(&self) -> Option<&DateTime<Tz>> {
        match self {
            Self::Zero => None,
            Self::At(t) => Some(t),
        }
    }

    /// Convert into the calendar point, mapping the zero sentinel to `None`.
    #[must_use]
    pub fn into_datetime(self) -> Option<DateTime<Tz>> {
        match self {
            Self::Zero => None,
            Self::At(t) => Some(t),
        }
    }
}

/// A client-side value that can be rendered as a SQL literal.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// NULL value.
    Null,
    /// Boolean value, rendered as `1` or `0`.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Unsigned integer.
    UInt(u64),
    /// Floating point.
    Double(f64),
    /// Binary string (BLOB, VARBINARY).
    Bytes(Bytes),
    /// Character string (CHAR, VARCHAR, TEXT).
    String(String),
    /// DATETIME/TIMESTAMP with its offset.
    ///
    /// Converted to the session time zone before rendering.
    DateTime(DateTime<FixedOffset>),
    /// DATETIME wall-clock value, rendered as-is.
    NaiveDateTime(NaiveDateTime),
    /// The zero datetime `0000-00-00`.
    ZeroDateTime,
}

impl SqlValue {
    /// Check if the value is NULL.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Get the value as an i64, if it is one.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            Self::UInt(v) => i64::try_from(*v).ok(),
            _ => None,
        }
    }

    /// Get the value as a string slice, if it is one.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    /// Get the value as bytes, if it is binary.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(v) => Some(v),
            _ => None,
        }
    }

    /// Get the type name for error messages.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "NULL",
            Self::Bool(_) => "BOOL",
            Self::Int(_) => "BIGINT",
            Self::UInt(_) => "BIGINT UNSIGNED",
            Self::Double(_) => "DOUBLE",
            Self::Bytes(_) => "BLOB",
            Self::String(_) => "TEXT",
            Self::DateTime(_) | Self::NaiveDateTime(_) | Self::ZeroDateTime => "DATETIME",
        }
    }
}

impl<Tz: TimeZone> From<DateTimeValue<Tz>> for SqlValue {
    fn from(value: DateTimeValue<Tz>) -> Self {
        match value {
            DateTimeValue::Zero => Self::ZeroDateTime,
            DateTimeValue::At(t) => Self::DateTime(t.fixed_offset()),
        }
    }
}
