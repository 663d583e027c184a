//! Protocol error types.

use thiserror::Error;

/// Errors raised while reading protocol primitives.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// The buffer ends before the width announced by a length prefix.
    #[error("malformed input: need {needed} bytes, have {available}")]
    MalformedInput {
        /// Bytes required by the prefix, including the prefix itself.
        needed: usize,
        /// Bytes actually present.
        available: usize,
    },

    /// A byte that can never start a length-encoded integer.
    #[error("invalid length-encoded integer prefix: 0x{0:02X}")]
    InvalidLengthPrefix(u8),

    /// Column type byte not defined by the protocol.
    #[error("unknown column type: 0x{0:02X}")]
    UnknownColumnType(u8),
}
