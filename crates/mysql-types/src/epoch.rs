//! Epoch-millisecond timestamps.
//!
//! Some columns and protocol extensions carry instants as a 64-bit count of
//! milliseconds since 1970-01-01T00:00:00Z. The field is unsigned on the
//! wire but holds a two's-complement value: instants before the epoch are
//! negative.

use chrono::{DateTime, Utc};

/// Convert the raw field to a UTC instant with whole-second precision.
///
/// The millisecond count is scaled to nanoseconds in 64-bit arithmetic,
/// which wraps for counts beyond roughly ±292 years from the epoch. The
/// second count is then taken with floor division, so one millisecond
/// before the epoch is one second before the epoch.
fn to_utc(bits: u64) -> DateTime<Utc> {
    let nanos = (bits as i64).wrapping_mul(1_000_000);
    let secs = nanos.div_euclid(1_000_000_000);
    // Always representable: |secs| < 2^63 / 10^9.
    DateTime::from_timestamp(secs, 0).unwrap_or_default()
}

/// Format an epoch-millisecond field as `YYYY-MM-DD HH:MM:SS` (UTC).
#[must_use]
pub fn format_time_millis(bits: u64) -> String {
    to_utc(bits).format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Format an epoch-millisecond field as `YYYY-MM-DD` (UTC).
#[must_use]
pub fn format_date_millis(bits: u64) -> String {
    to_utc(bits).format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CASES: &[(u64, &str)] = &[
        (4, "1970-01-01 00:00:00"),
        (1_844_674, "1970-01-01 00:30:44"),
        (18_446_744_073_709_551_615, "1969-12-31 23:59:59"),
        (1_653_055_405, "1970-01-20 03:10:55"),
        (45_408_320_589_235_234, "1730-04-30 13:42:42"),
        (123_456, "1970-01-01 00:02:03"),
    ];

    #[test]
    fn test_format_time_millis() {
        for &(bits, expected) in CASES {
            assert_eq!(format_time_millis(bits), expected, "{bits}");
        }
    }

    #[test]
    fn test_format_date_millis() {
        for &(bits, expected) in CASES {
            assert_eq!(format_date_millis(bits), &expected[..10], "{bits}");
        }
    }

    #[test]
    fn test_floor_before_epoch() {
        // -1001 ms is 1.001 s before the epoch: floor gives -2 s.
        assert_eq!(format_time_millis((-1001i64) as u64), "1969-12-31 23:59:58");
        assert_eq!(format_time_millis((-1000i64) as u64), "1969-12-31 23:59:59");
    }
}
