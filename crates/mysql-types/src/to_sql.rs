//! Conversion of Rust values into [`SqlValue`] for literal interpolation.

use bytes::Bytes;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};

use crate::error::TypeError;
use crate::value::{DateTimeValue, SqlValue};

/// Trait for types that can be bound as query arguments.
pub trait ToSql {
    /// Convert this value to a SQL value.
    fn to_sql(&self) -> Result<SqlValue, TypeError>;

    /// Get the MySQL type name for this value.
    fn sql_type(&self) -> &'static str;
}

macro_rules! impl_to_sql_int {
    ($variant:ident, $wide:ty: $($ty:ty => $name:literal),+ $(,)?) => {
        $(
            impl ToSql for $ty {
                fn to_sql(&self) -> Result<SqlValue, TypeError> {
                    Ok(SqlValue::$variant(<$wide>::from(*self)))
                }

                fn sql_type(&self) -> &'static str {
                    $name
                }
            }
        )+
    };
}

impl_to_sql_int!(Int, i64:
    i8 => "TINYINT",
    i16 => "SMALLINT",
    i32 => "INT",
    i64 => "BIGINT",
);

impl_to_sql_int!(UInt, u64:
    u8 => "TINYINT UNSIGNED",
    u16 => "SMALLINT UNSIGNED",
    u32 => "INT UNSIGNED",
    u64 => "BIGINT UNSIGNED",
);

impl ToSql for bool {
    fn to_sql(&self) -> Result<SqlValue, TypeError> {
        Ok(SqlValue::Bool(*self))
    }

    fn sql_type(&self) -> &'static str {
        "BOOL"
    }
}

impl ToSql for f32 {
    fn to_sql(&self) -> Result<SqlValue, TypeError> {
        f64::from(*self).to_sql()
    }

    fn sql_type(&self) -> &'static str {
        "FLOAT"
    }
}

impl ToSql for f64 {
    fn to_sql(&self) -> Result<SqlValue, TypeError> {
        // SQL has no literal for infinities or NaN.
        if !self.is_finite() {
            return Err(TypeError::OutOfRange {
                target_type: "DOUBLE",
            });
        }
        Ok(SqlValue::Double(*self))
    }

    fn sql_type(&self) -> &'static str {
        "DOUBLE"
    }
}

impl ToSql for str {
    fn to_sql(&self) -> Result<SqlValue, TypeError> {
        Ok(SqlValue::String(self.to_owned()))
    }

    fn sql_type(&self) -> &'static str {
        "VARCHAR"
    }
}

impl ToSql for String {
    fn to_sql(&self) -> Result<SqlValue, TypeError> {
        self.as_str().to_sql()
    }

    fn sql_type(&self) -> &'static str {
        "VARCHAR"
    }
}

impl ToSql for [u8] {
    fn to_sql(&self) -> Result<SqlValue, TypeError> {
        Ok(SqlValue::Bytes(Bytes::copy_from_slice(self)))
    }

    fn sql_type(&self) -> &'static str {
        "VARBINARY"
    }
}

impl ToSql for Vec<u8> {
    fn to_sql(&self) -> Result<SqlValue, TypeError> {
        self.as_slice().to_sql()
    }

    fn sql_type(&self) -> &'static str {
        "VARBINARY"
    }
}

impl ToSql for Bytes {
    fn to_sql(&self) -> Result<SqlValue, TypeError> {
        Ok(SqlValue::Bytes(self.clone()))
    }

    fn sql_type(&self) -> &'static str {
        "VARBINARY"
    }
}

impl<Tz: TimeZone> ToSql for DateTime<Tz> {
    fn to_sql(&self) -> Result<SqlValue, TypeError> {
        Ok(SqlValue::DateTime(self.fixed_offset()))
    }

    fn sql_type(&self) -> &'static str {
        "DATETIME"
    }
}

impl<Tz: TimeZone> ToSql for DateTimeValue<Tz> {
    fn to_sql(&self) -> Result<SqlValue, TypeError> {
        Ok(SqlValue::from(self.clone()))
    }

    fn sql_type(&self) -> &'static str {
        "DATETIME"
    }
}

impl ToSql for NaiveDateTime {
    fn to_sql(&self) -> Result<SqlValue, TypeError> {
        Ok(SqlValue::NaiveDateTime(*self))
    }

    fn sql_type(&self) -> &'static str {
        "DATETIME"
    }
}

impl ToSql for NaiveDate {
    fn to_sql(&self) -> Result<SqlValue, TypeError> {
        Ok(SqlValue::NaiveDateTime(self.and_time(chrono::NaiveTime::MIN)))
    }

    fn sql_type(&self) -> &'static str {
        "DATE"
    }
}

impl<T: ToSql> ToSql for Option<T> {
    fn to_sql(&self) -> Result<SqlValue, TypeError> {
        match self {
            Some(v) => v.to_sql(),
            None => Ok(SqlValue::Null),
        }
    }

    fn sql_type(&self) -> &'static str {
        match self {
            Some(v) => v.sql_type(),
            None => "NULL",
        }
    }
}

impl<T: ToSql + ?Sized> ToSql for &T {
    fn to_sql(&self) -> Result<SqlValue, TypeError> {
        (*self).to_sql()
    }

    fn sql_type(&self) -> &'static str {
        (*self).sql_type()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn test_to_sql_integers() {
        assert_eq!((-5i8).to_sql().unwrap(), SqlValue::Int(-5));
        assert_eq!(42i32.to_sql().unwrap(), SqlValue::Int(42));
        assert_eq!(u64::MAX.to_sql().unwrap(), SqlValue::UInt(u64::MAX));
        assert_eq!(7u16.sql_type(), "SMALLINT UNSIGNED");
    }

    #[test]
    fn test_to_sql_floats() {
        assert_eq!(1.5f32.to_sql().unwrap(), SqlValue::Double(1.5));
        assert_eq!(
            f64::NAN.to_sql(),
            Err(TypeError::OutOfRange {
                target_type: "DOUBLE"
            })
        );
        assert!(f32::INFINITY.to_sql().is_err());
    }

    #[test]
    fn test_to_sql_strings_and_bytes() {
        assert_eq!("hi".to_sql().unwrap(), SqlValue::String("hi".into()));
        assert_eq!(String::from("hi").sql_type(), "VARCHAR");
        let raw: &[u8] = b"\x00\xff";
        assert_eq!(
            raw.to_sql().unwrap(),
            SqlValue::Bytes(Bytes::from_static(b"\x00\xff"))
        );
        assert_eq!(vec![1u8].sql_type(), "VARBINARY");
    }

    #[test]
    fn test_to_sql_option() {
        let some: Option<i32> = Some(42);
        assert_eq!(some.to_sql().unwrap(), SqlValue::Int(42));

        let none: Option<&str> = None;
        assert_eq!(none.to_sql().unwrap(), SqlValue::Null);
        assert_eq!(none.sql_type(), "NULL");
    }

    #[test]
    fn test_to_sql_chrono() {
        let t = Utc.with_ymd_and_hms(2020, 5, 13, 21, 30, 45).unwrap();
        assert_eq!(t.to_sql().unwrap(), SqlValue::DateTime(t.fixed_offset()));

        let tz = FixedOffset::east_opt(3600).unwrap();
        let local = tz.with_ymd_and_hms(2020, 5, 13, 21, 30, 45).unwrap();
        assert_eq!(local.to_sql().unwrap(), SqlValue::DateTime(local));

        let date = NaiveDate::from_ymd_opt(2020, 5, 13).unwrap();
        assert_eq!(
            date.to_sql().unwrap(),
            SqlValue::NaiveDateTime(date.and_hms_opt(0, 0, 0).unwrap())
        );
        assert_eq!(
            DateTimeValue::<Utc>::Zero.to_sql().unwrap(),
            SqlValue::ZeroDateTime
        );
    }
}
