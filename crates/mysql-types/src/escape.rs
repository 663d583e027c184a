//! SQL string escaping.
//!
//! Two disciplines make text safe inside a single-quoted SQL literal:
//!
//! - **Backslash** (the server default): `\0`, `\n`, `\r`, `\Z`, `\"`,
//!   `\\` and `\'` replace NUL, LF, CR, 0x1A, `"`, `\` and `'`.
//! - **Quotes** (`NO_BACKSLASH_ESCAPES` in the SQL mode): backslash is an
//!   ordinary character, so only `'` is doubled.
//!
//! Which one applies is a session property; the caller picks it.

use mysql_protocol::StatusFlags;

/// Escaping discipline for string literals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum EscapeMode {
    /// Backslash escapes are enabled.
    #[default]
    Backslash,
    /// `NO_BACKSLASH_ESCAPES` is in effect.
    Quotes,
}

impl EscapeMode {
    /// Select the mode from the `NO_BACKSLASH_ESCAPES` setting.
    #[must_use]
    pub fn from_no_backslash_escapes(enabled: bool) -> Self {
        if enabled { Self::Quotes } else { Self::Backslash }
    }

    /// Select the mode from the server status flags of the last OK packet.
    #[must_use]
    pub fn from_status_flags(flags: StatusFlags) -> Self {
        Self::from_no_backslash_escapes(flags.contains(StatusFlags::NO_BACKSLASH_ESCAPES))
    }

    /// Append `src` to `dst`, escaped in this mode.
    pub fn escape_bytes(self, dst: &mut Vec<u8>, src: &[u8]) {
        match self {
            Self::Backslash => escape_bytes_backslash(dst, src),
            Self::Quotes => escape_bytes_quotes(dst, src),
        }
    }

    /// Append `src` to `dst`, escaped in this mode.
    pub fn escape_str(self, dst: &mut Vec<u8>, src: &str) {
        self.escape_bytes(dst, src.as_bytes());
    }
}

fn backslash_escape(b: u8) -> Option<u8> {
    match b {
        0x00 => Some(b'0'),
        b'\n' => Some(b'n'),
        b'\r' => Some(b'r'),
        0x1A => Some(b'Z'),
        b'\'' => Some(b'\''),
        b'"' => Some(b'"'),
        b'\\' => Some(b'\\'),
        _ => None,
    }
}

/// Append `src` to `dst` with backslash escapes.
pub fn escape_bytes_backslash(dst: &mut Vec<u8>, src: &[u8]) {
    dst.reserve(src.len() * 2);
    for &b in src {
        match backslash_escape(b) {
            Some(esc) => dst.extend_from_slice(&[b'\\', esc]),
            None => dst.push(b),
        }
    }
}

/// Append `src` to `dst` with backslash escapes.
pub fn escape_str_backslash(dst: &mut Vec<u8>, src: &str) {
    escape_bytes_backslash(dst, src.as_bytes());
}

/// Append `src` to `dst`, doubling single quotes.
pub fn escape_bytes_quotes(dst: &mut Vec<u8>, src: &[u8]) {
    dst.reserve(src.len() * 2);
    for &b in src {
        if b == b'\'' {
            dst.extend_from_slice(b"''");
        } else {
            dst.push(b);
        }
    }
}

/// Append `src` to `dst`, doubling single quotes.
pub fn escape_str_quotes(dst: &mut Vec<u8>, src: &str) {
    escape_bytes_quotes(dst, src.as_bytes());
}
