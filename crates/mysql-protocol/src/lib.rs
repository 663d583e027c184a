//! # mysql-protocol
//!
//! Wire-level primitives of the MySQL client/server protocol.
//!
//! This crate holds the pieces every packet reader and writer needs: the
//! length-encoded integer and string codec, column type identifiers as they
//! appear in column definitions, and the column/status flag sets.
//!
//! ## Design Philosophy
//!
//! This crate is IO-agnostic. It operates on in-memory buffers through the
//! `bytes` traits and makes no assumptions about transport or runtime.
//!
//! ## Example
//!
//! ```rust
//! use bytes::BytesMut;
//! use mysql_protocol::{LenEncInt, decode_lenenc_int, encode_lenenc_int};
//!
//! let mut buf = BytesMut::new();
//! encode_lenenc_int(256, &mut buf);
//! assert_eq!(&buf[..], &[0xFC, 0x00, 0x01]);
//!
//! let (value, consumed) = decode_lenenc_int(&buf).unwrap();
//! assert_eq!(value, LenEncInt::Value(256));
//! assert_eq!(consumed, 3);
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod lenenc;
pub mod types;

pub use error::ProtocolError;
pub use lenenc::{
    LENENC_NULL, LenEncInt, decode_lenenc_int, encode_lenenc_int, lenenc_int_len,
    read_lenenc_bytes, read_lenenc_int, skip_lenenc_bytes, write_lenenc_bytes,
};
pub use types::{ColumnFlags, ColumnType, StatusFlags};
