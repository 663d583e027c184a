#![no_main]

use arbitrary::Arbitrary;
use bytes::Bytes;
use libfuzzer_sys::fuzz_target;
use mysql_protocol::ColumnType;
use mysql_types::{decode_binary_temporal, format_binary_datetime, format_binary_time};

#[derive(Debug, Arbitrary)]
struct Input {
    type_byte: u8,
    decimals: u8,
    out_len: u8,
    row: Vec<u8>,
}

fuzz_target!(|input: Input| {
    // Raw payload renderers with arbitrary lengths.
    if let Ok(text) = format_binary_datetime(&input.row, input.out_len) {
        assert!(text.is_ascii());
    }
    if let Ok(text) = format_binary_time(&input.row, input.out_len) {
        assert!(text.is_ascii());
    }

    // Length-prefixed row field with arbitrary column metadata.
    if let Ok(column_type) = ColumnType::try_from(input.type_byte) {
        let mut row = Bytes::from(input.row);
        let _ = decode_binary_temporal(&mut row, column_type, input.decimals);
    }
});
