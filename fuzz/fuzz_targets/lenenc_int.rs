#![no_main]

use bytes::{Buf, BytesMut};
use libfuzzer_sys::fuzz_target;
use mysql_protocol::{LenEncInt, decode_lenenc_int, encode_lenenc_int, read_lenenc_int};

fuzz_target!(|data: &[u8]| {
    let decoded = decode_lenenc_int(data);

    // The slice and cursor readers must agree, and a failed read must not
    // move the cursor.
    let mut cursor = data;
    match (&decoded, read_lenenc_int(&mut cursor)) {
        (Ok((value, used)), Ok(read)) => {
            assert_eq!(*value, read);
            assert_eq!(*used, data.len() - cursor.remaining());
        }
        (Err(a), Err(b)) => {
            assert_eq!(*a, b);
            assert_eq!(cursor.len(), data.len());
        }
        _ => panic!("decoders disagree"),
    }

    // Every non-NULL value re-encodes to the canonical form, which
    // decodes to the same value.
    if let Ok((LenEncInt::Value(v), _)) = decoded {
        let mut buf = BytesMut::new();
        encode_lenenc_int(v, &mut buf);
        let (again, used) = decode_lenenc_int(&buf).unwrap();
        assert_eq!(again, LenEncInt::Value(v));
        assert_eq!(used, buf.len());
    }
});
