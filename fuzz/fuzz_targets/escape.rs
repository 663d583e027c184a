#![no_main]

use libfuzzer_sys::fuzz_target;
use mysql_types::{escape_bytes_backslash, escape_bytes_quotes};

fuzz_target!(|data: &[u8]| {
    // Quotes mode: no lone single quote may survive.
    let mut quoted = Vec::new();
    escape_bytes_quotes(&mut quoted, data);
    let mut i = 0;
    while i < quoted.len() {
        if quoted[i] == b'\'' {
            assert_eq!(quoted.get(i + 1), Some(&b'\''));
            i += 2;
        } else {
            i += 1;
        }
    }

    // Backslash mode: undoing the escapes restores the input.
    let mut escaped = Vec::new();
    escape_bytes_backslash(&mut escaped, data);
    let mut restored = Vec::with_capacity(data.len());
    let mut iter = escaped.iter();
    while let Some(&b) = iter.next() {
        if b != b'\\' {
            assert!(!matches!(b, 0 | b'\n' | b'\r' | 0x1A | b'\'' | b'"'));
            restored.push(b);
            continue;
        }
        let next = *iter.next().unwrap();
        restored.push(match next {
            b'0' => 0,
            b'n' => b'\n',
            b'r' => b'\r',
            b'Z' => 0x1A,
            other => other,
        });
    }
    assert_eq!(restored, data);
});
