//! Length-encoded integers and strings.
//!
//! MySQL prefixes lengths and many counters with a self-describing
//! variable-width unsigned integer. The first byte selects the width:
//!
//! | First byte    | Meaning                           | Total bytes |
//! |---------------|-----------------------------------|-------------|
//! | `0x00..=0xFA` | the byte itself is the value      | 1           |
//! | `0xFB`        | NULL                              | 1           |
//! | `0xFC`        | followed by a 2-byte LE integer   | 3           |
//! | `0xFD`        | followed by a 3-byte LE integer   | 4           |
//! | `0xFE`        | followed by an 8-byte LE integer  | 9           |
//!
//! `0xFF` introduces an error packet and is rejected here.

use bytes::{Buf, BufMut, Bytes};

use crate::error::ProtocolError;

/// Prefix byte of a NULL value.
pub const LENENC_NULL: u8 = 0xFB;

const PREFIX_U16: u8 = 0xFC;
const PREFIX_U24: u8 = 0xFD;
const PREFIX_U64: u8 = 0xFE;
const PREFIX_ERR: u8 = 0xFF;

/// A decoded length-encoded integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LenEncInt {
    /// SQL NULL (prefix `0xFB`).
    Null,
    /// An unsigned magnitude.
    Value(u64),
}

impl LenEncInt {
    /// Check if this is the NULL marker.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Get the magnitude, or `None` for NULL.
    #[must_use]
    pub fn value(&self) -> Option<u64> {
        match self {
            Self::Null => None,
            Self::Value(v) => Some(*v),
        }
    }

    /// Number of bytes this value occupies on the wire.
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        match self {
            Self::Null => 1,
            Self::Value(v) => lenenc_int_len(*v),
        }
    }
}

impl From<u64> for LenEncInt {
    fn from(value: u64) -> Self {
        Self::Value(value)
    }
}

impl From<Option<u64>> for LenEncInt {
    fn from(value: Option<u64>) -> Self {
        value.map_or(Self::Null, Self::Value)
    }
}

/// Width of the payload that follows a prefix byte.
///
/// Returns `None` for the NULL marker and for single-byte literals.
fn payload_width(prefix: u8) -> Result<Option<usize>, ProtocolError> {
    match prefix {
        PREFIX_U16 => Ok(Some(2)),
        PREFIX_U24 => Ok(Some(3)),
        PREFIX_U64 => Ok(Some(8)),
        PREFIX_ERR => Err(ProtocolError::InvalidLengthPrefix(prefix)),
        _ => Ok(None),
    }
}

/// Decode a length-encoded integer from the start of `buf`.
///
/// Returns the value and the number of bytes consumed. The buffer may hold
/// trailing data after the integer.
pub fn decode_lenenc_int(buf: &[u8]) -> Result<(LenEncInt, usize), ProtocolError> {
    let Some(&prefix) = buf.first() else {
        return Err(ProtocolError::MalformedInput {
            needed: 1,
            available: 0,
        });
    };

    if prefix == LENENC_NULL {
        return Ok((LenEncInt::Null, 1));
    }

    let Some(width) = payload_width(prefix)? else {
        return Ok((LenEncInt::Value(u64::from(prefix)), 1));
    };

    let needed = 1 + width;
    if buf.len() < needed {
        return Err(ProtocolError::MalformedInput {
            needed,
            available: buf.len(),
        });
    }

    let mut le = [0u8; 8];
    le[..width].copy_from_slice(&buf[1..needed]);
    Ok((LenEncInt::Value(u64::from_le_bytes(le)), needed))
}

/// Read a length-encoded integer from a buffer cursor.
///
/// On error the cursor is left where it was.
pub fn read_lenenc_int(src: &mut impl Buf) -> Result<LenEncInt, ProtocolError> {
    if !src.has_remaining() {
        return Err(ProtocolError::MalformedInput {
            needed: 1,
            available: 0,
        });
    }

    let prefix = src.chunk()[0];
    if prefix == LENENC_NULL {
        src.advance(1);
        return Ok(LenEncInt::Null);
    }

    match payload_width(prefix)? {
        None => {
            src.advance(1);
            Ok(LenEncInt::Value(u64::from(prefix)))
        }
        Some(width) => {
            if src.remaining() < 1 + width {
                return Err(ProtocolError::MalformedInput {
                    needed: 1 + width,
                    available: src.remaining(),
                });
            }
            src.advance(1);
            Ok(LenEncInt::Value(src.get_uint_le(width)))
        }
    }
}

/// Number of bytes `encode_lenenc_int` writes for `value`.
#[must_use]
pub const fn lenenc_int_len(value: u64) -> usize {
    if value < 251 {
        1
    } else if value < 1 << 16 {
        3
    } else if value < 1 << 24 {
        4
    } else {
        9
    }
}

/// Write `value` in the narrowest length-encoded form.
///
/// Never emits the NULL marker.
pub fn encode_lenenc_int(value: u64, dst: &mut impl BufMut) {
    match lenenc_int_len(value) {
        1 => dst.put_u8(value as u8),
        3 => {
            dst.put_u8(PREFIX_U16);
            dst.put_u16_le(value as u16);
        }
        4 => {
            dst.put_u8(PREFIX_U24);
            dst.put_uint_le(value, 3);
        }
        _ => {
            dst.put_u8(PREFIX_U64);
            dst.put_u64_le(value);
        }
    }
}

/// Read a length-encoded byte string.
///
/// Returns `None` when the length prefix is NULL.
pub fn read_lenenc_bytes(src: &mut impl Buf) -> Result<Option<Bytes>, ProtocolError> {
    let Some(len) = read_lenenc_int(src)?.value() else {
        return Ok(None);
    };
    let len = checked_len(len, src.remaining())?;
    Ok(Some(src.copy_to_bytes(len)))
}

/// Skip over a length-encoded byte string without copying it.
pub fn skip_lenenc_bytes(src: &mut impl Buf) -> Result<(), ProtocolError> {
    if let Some(len) = read_lenenc_int(src)?.value() {
        let len = checked_len(len, src.remaining())?;
        src.advance(len);
    }
    Ok(())
}

/// Write `data` prefixed by its length-encoded length.
pub fn write_lenenc_bytes(dst: &mut impl BufMut, data: &[u8]) {
    encode_lenenc_int(data.len() as u64, dst);
    dst.put_slice(data);
}

fn checked_len(len: u64, available: usize) -> Result<usize, ProtocolError> {
    match usize::try_from(len) {
        Ok(len) if len <= available => Ok(len),
        _ => Err(ProtocolError::MalformedInput {
            needed: usize::try_from(len).unwrap_or(usize::MAX),
            available,
        }),
    }
}
