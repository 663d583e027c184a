#![no_main]

use chrono::{FixedOffset, Utc};
use libfuzzer_sys::fuzz_target;
use mysql_types::{DateTimeValue, format_datetime, parse_datetime};

fuzz_target!(|data: &[u8]| {
    let Ok(value) = parse_datetime(data, &Utc) else {
        return;
    };

    // Anything accepted and printable parses back to the same point. Year
    // zero is accepted but has no canonical text.
    if let DateTimeValue::At(t) = value {
        if let Ok(text) = format_datetime(&t) {
            assert_eq!(parse_datetime(text.as_bytes(), &Utc).unwrap(), DateTimeValue::At(t));
        }
    }

    // Fixed offsets have no gaps, so acceptance does not depend on the zone.
    let east = FixedOffset::east_opt(14 * 3600).unwrap();
    assert!(parse_datetime(data, &east).is_ok());
});
