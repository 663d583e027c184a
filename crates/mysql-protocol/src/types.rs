//! MySQL column type identifiers and flag sets.
//!
//! Column types and column flags arrive in column definition packets;
//! status flags arrive in OK and EOF packets.

use bitflags::bitflags;

use crate::error::ProtocolError;

/// Column type identifiers.
///
/// These correspond to the `column_type` byte of a column definition and to
/// the parameter types of a prepared statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ColumnType {
    /// Old-style DECIMAL.
    Decimal = 0x00,
    /// TINYINT.
    Tiny = 0x01,
    /// SMALLINT.
    Short = 0x02,
    /// INT.
    Long = 0x03,
    /// FLOAT.
    Float = 0x04,
    /// DOUBLE.
    Double = 0x05,
    /// NULL.
    Null = 0x06,
    /// TIMESTAMP.
    Timestamp = 0x07,
    /// BIGINT.
    LongLong = 0x08,
    /// MEDIUMINT.
    Int24 = 0x09,
    /// DATE.
    Date = 0x0A,
    /// TIME.
    Time = 0x0B,
    /// DATETIME.
    DateTime = 0x0C,
    /// YEAR.
    Year = 0x0D,
    /// Internal DATE representation.
    NewDate = 0x0E,
    /// VARCHAR.
    VarChar = 0x0F,
    /// BIT.
    Bit = 0x10,
    /// Fractional TIMESTAMP (server internal).
    Timestamp2 = 0x11,
    /// Fractional DATETIME (server internal).
    DateTime2 = 0x12,
    /// Fractional TIME (server internal).
    Time2 = 0x13,
    /// JSON.
    Json = 0xF5,
    /// DECIMAL / NUMERIC.
    NewDecimal = 0xF6,
    /// ENUM.
    Enum = 0xF7,
    /// SET.
    Set = 0xF8,
    /// TINYBLOB / TINYTEXT.
    TinyBlob = 0xF9,
    /// MEDIUMBLOB / MEDIUMTEXT.
    MediumBlob = 0xFA,
    /// LONGBLOB / LONGTEXT.
    LongBlob = 0xFB,
    /// BLOB / TEXT.
    Blob = 0xFC,
    /// VARBINARY / VARCHAR.
    VarString = 0xFD,
    /// BINARY / CHAR.
    String = 0xFE,
    /// GEOMETRY.
    Geometry = 0xFF,
}

impl ColumnType {
    /// Check if values of this type are dates, datetimes or timestamps.
    #[must_use]
    pub const fn is_date_family(&self) -> bool {
        matches!(
            self,
            Self::Date | Self::NewDate | Self::DateTime | Self::Timestamp
        )
    }

    /// Check if this is a date/time type of any kind, including TIME.
    #[must_use]
    pub const fn is_temporal(&self) -> bool {
        self.is_date_family() || matches!(self, Self::Time)
    }

    /// Get the width of this type in binary result-set rows, if fixed.
    #[must_use]
    pub const fn fixed_size(&self) -> Option<usize> {
        match self {
            Self::Tiny => Some(1),
            Self::Short | Self::Year => Some(2),
            Self::Long | Self::Int24 | Self::Float => Some(4),
            Self::LongLong | Self::Double => Some(8),
            Self::Null => Some(0),
            _ => None,
        }
    }
}

impl TryFrom<u8> for ColumnType {
    type Error = ProtocolError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x00 => Ok(Self::Decimal),
            0x01 => Ok(Self::Tiny),
            0x02 => Ok(Self::Short),
            0x03 => Ok(Self::Long),
            0x04 => Ok(Self::Float),
            0x05 => Ok(Self::Double),
            0x06 => Ok(Self::Null),
            0x07 => Ok(Self::Timestamp),
            0x08 => Ok(Self::LongLong),
            0x09 => Ok(Self::Int24),
            0x0A => Ok(Self::Date),
            0x0B => Ok(Self::Time),
            0x0C => Ok(Self::DateTime),
            0x0D => Ok(Self::Year),
            0x0E => Ok(Self::NewDate),
            0x0F => Ok(Self::VarChar),
            0x10 => Ok(Self::Bit),
            0x11 => Ok(Self::Timestamp2),
            0x12 => Ok(Self::DateTime2),
            0x13 => Ok(Self::Time2),
            0xF5 => Ok(Self::Json),
            0xF6 => Ok(Self::NewDecimal),
            0xF7 => Ok(Self::Enum),
            0xF8 => Ok(Self::Set),
            0xF9 => Ok(Self::TinyBlob),
            0xFA => Ok(Self::MediumBlob),
            0xFB => Ok(Self::LongBlob),
            0xFC => Ok(Self::Blob),
            0xFD => Ok(Self::VarString),
            0xFE => Ok(Self::String),
            0xFF => Ok(Self::Geometry),
            _ => Err(ProtocolError::UnknownColumnType(value)),
        }
    }
}

bitflags! {
    /// Column definition flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ColumnFlags: u16 {
        /// Field can't be NULL.
        const NOT_NULL = 0x0001;
        /// Field is part of a primary key.
        const PRI_KEY = 0x0002;
        /// Field is part of a unique key.
        const UNIQUE_KEY = 0x0004;
        /// Field is part of a non-unique key.
        const MULTIPLE_KEY = 0x0008;
        /// Field is a blob.
        const BLOB = 0x0010;
        /// Field is unsigned.
        const UNSIGNED = 0x0020;
        /// Field is zerofill.
        const ZEROFILL = 0x0040;
        /// Field is binary.
        const BINARY = 0x0080;
        /// Field is an enum.
        const ENUM = 0x0100;
        /// Field is an auto-increment field.
        const AUTO_INCREMENT = 0x0200;
        /// Field is a timestamp.
        const TIMESTAMP = 0x0400;
        /// Field is a set.
        const SET = 0x0800;
        /// Field doesn't have a default value.
        const NO_DEFAULT_VALUE = 0x1000;
        /// Field is set to NOW on UPDATE.
        const ON_UPDATE_NOW = 0x2000;
        /// Field is numeric.
        const NUM = 0x8000;
    }
}

bitflags! {
    /// Server status flags from OK and EOF packets.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StatusFlags: u16 {
        /// A transaction is active.
        const IN_TRANS = 0x0001;
        /// Autocommit mode is enabled.
        const AUTOCOMMIT = 0x0002;
        /// More result sets follow.
        const MORE_RESULTS_EXISTS = 0x0008;
        /// No good index was used.
        const NO_GOOD_INDEX_USED = 0x0010;
        /// No index was used.
        const NO_INDEX_USED = 0x0020;
        /// A read-only cursor is open.
        const CURSOR_EXISTS = 0x0040;
        /// The last row of a cursor was sent.
        const LAST_ROW_SENT = 0x0080;
        /// The current database was dropped.
        const DB_DROPPED = 0x0100;
        /// `NO_BACKSLASH_ESCAPES` is set in the session SQL mode.
        const NO_BACKSLASH_ESCAPES = 0x0200;
        /// Prepared statement metadata changed.
        const METADATA_CHANGED = 0x0400;
        /// The query was logged as slow.
        const QUERY_WAS_SLOW = 0x0800;
        /// The result set holds OUT parameters.
        const PS_OUT_PARAMS = 0x1000;
        /// A read-only transaction is active.
        const IN_TRANS_READONLY = 0x2000;
        /// Session state changed.
        const SESSION_STATE_CHANGED = 0x4000;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_column_type_from_u8() {
        assert_eq!(ColumnType::try_from(0x0A).unwrap(), ColumnType::Date);
        assert_eq!(ColumnType::try_from(0xFD).unwrap(), ColumnType::VarString);
        assert_eq!(
            ColumnType::try_from(0x99),
            Err(ProtocolError::UnknownColumnType(0x99))
        );
    }

    #[test]
    fn test_temporal_detection() {
        assert!(ColumnType::Timestamp.is_date_family());
        assert!(ColumnType::NewDate.is_date_family());
        assert!(!ColumnType::Time.is_date_family());
        assert!(ColumnType::Time.is_temporal());
        assert!(!ColumnType::Year.is_temporal());
    }

    #[test]
    fn test_fixed_size() {
        assert_eq!(ColumnType::LongLong.fixed_size(), Some(8));
        assert_eq!(ColumnType::Year.fixed_size(), Some(2));
        assert_eq!(ColumnType::Date.fixed_size(), None);
    }

    #[test]
    fn test_status_flags() {
        let flags = StatusFlags::from_bits_truncate(0x0202);
        assert!(flags.contains(StatusFlags::NO_BACKSLASH_ESCAPES));
        assert!(flags.contains(StatusFlags::AUTOCOMMIT));
        assert!(!flags.contains(StatusFlags::IN_TRANS));
    }

    #[test]
    fn test_column_flags() {
        let flags = ColumnFlags::from_bits_truncate(0x00A1);
        assert!(flags.contains(ColumnFlags::NOT_NULL | ColumnFlags::UNSIGNED | ColumnFlags::BINARY));
        assert_eq!(flags.bits(), 0x00A1);
    }
}
