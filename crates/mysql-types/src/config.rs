//! Codec configuration.

use chrono::{FixedOffset, Offset, Utc};
use mysql_protocol::ColumnType;

use crate::error::TypeError;
use crate::escape::EscapeMode;
use crate::text::parse_datetime;
use crate::value::DateTimeValue;

/// Interpret a boolean option value.
///
/// Accepts `1`, `true`, `TRUE`, `True` and their false counterparts.
/// Anything else is `None`.
#[must_use]
pub fn read_bool(input: &str) -> Option<bool> {
    match input {
        "1" | "true" | "TRUE" | "True" => Some(true),
        "0" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}

/// Session settings that affect how values are rendered and decoded.
///
/// This struct is marked `#[non_exhaustive]` to allow adding new fields
/// in future minor versions without breaking changes. Use the builder
/// pattern methods or [`Default::default()`] to construct instances.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct CodecConfig {
    /// Whether the server runs with `NO_BACKSLASH_ESCAPES`.
    pub no_backslash_escapes: bool,

    /// Time zone for parsed datetimes and interpolated datetime literals.
    pub time_zone: FixedOffset,

    /// Whether text-protocol DATE/DATETIME/TIMESTAMP columns are parsed.
    pub parse_time: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            no_backslash_escapes: false,
            time_zone: utc(),
            parse_time: false,
        }
    }
}

impl CodecConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a configuration from `key=value` pairs joined by `&`.
    ///
    /// ```
    /// use mysql_types::CodecConfig;
    ///
    /// let config = CodecConfig::from_params("parseTime=true&loc=+08:00").unwrap();
    /// assert!(config.parse_time);
    /// assert_eq!(config.time_zone.local_minus_utc(), 8 * 3600);
    /// ```
    pub fn from_params(params: &str) -> Result<Self, TypeError> {
        let mut config = Self::default();
        for part in params.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = part.split_once('=').unwrap_or((part, ""));
            config.set_param(key, value)?;
        }
        Ok(config)
    }

    /// Enable or disable `NO_BACKSLASH_ESCAPES` handling.
    #[must_use]
    pub fn no_backslash_escapes(mut self, enabled: bool) -> Self {
        self.no_backslash_escapes = enabled;
        self
    }

    /// Set the session time zone.
    #[must_use]
    pub fn time_zone(mut self, offset: FixedOffset) -> Self {
        self.time_zone = offset;
        self
    }

    /// Enable or disable parsing of text temporal columns.
    #[must_use]
    pub fn parse_time(mut self, enabled: bool) -> Self {
        self.parse_time = enabled;
        self
    }

    /// Get the escaping discipline for string literals.
    #[must_use]
    pub fn escape_mode(&self) -> EscapeMode {
        EscapeMode::from_no_backslash_escapes(self.no_backslash_escapes)
    }

    /// Apply a single named parameter.
    ///
    /// Recognized keys are `parseTime`, `noBackslashEscapes` and `loc`.
    /// `loc` takes `UTC` or an offset such as `+08:00`.
    pub fn set_param(&mut self, key: &str, value: &str) -> Result<(), TypeError> {
        let invalid = || TypeError::InvalidParam {
            key: key.to_string(),
            value: value.to_string(),
        };

        match key {
            "parseTime" => self.parse_time = read_bool(value).ok_or_else(invalid)?,
            "noBackslashEscapes" => {
                self.no_backslash_escapes = read_bool(value).ok_or_else(invalid)?;
            }
            "loc" => self.time_zone = parse_offset(value).ok_or_else(invalid)?,
            _ => {
                tracing::debug!(key = key, value = value, "rejecting unknown codec parameter");
                return Err(invalid());
            }
        }
        Ok(())
    }

    /// Decode a text-protocol temporal column value.
    ///
    /// With `parse_time` set, DATE/DATETIME/TIMESTAMP text is parsed in
    /// the configured time zone. TIME values are durations, not calendar
    /// points, and always stay text.
    pub fn decode_text_temporal(
        &self,
        column_type: ColumnType,
        text: &[u8],
    ) -> Result<TextTemporal, TypeError> {
        if !column_type.is_temporal() {
            return Err(TypeError::UnsupportedColumnType(column_type));
        }
        if self.parse_time && column_type.is_date_family() {
            return parse_datetime(text, &self.time_zone).map(TextTemporal::Parsed);
        }
        Ok(TextTemporal::Text(String::from_utf8_lossy(text).into_owned()))
    }
}

/// A text-protocol temporal value after [`CodecConfig::decode_text_temporal`].
#[derive(Debug, Clone, PartialEq)]
pub enum TextTemporal {
    /// The value as sent by the server.
    Text(String),
    /// The parsed calendar point or zero sentinel.
    Parsed(DateTimeValue<FixedOffset>),
}

fn utc() -> FixedOffset {
    Utc.fix()
}

/// Parse `UTC` or `[+-]HH:MM`.
fn parse_offset(value: &str) -> Option<FixedOffset> {
    if value == "UTC" {
        return Some(utc());
    }

    let bytes = value.as_bytes();
    if bytes.len() != 6 || bytes[3] != b':' {
        return None;
    }
    if ![1, 2, 4, 5].iter().all(|&i| bytes[i].is_ascii_digit()) {
        return None;
    }
    let sign = match bytes[0] {
        b'+' => 1,
        b'-' => -1,
        _ => return None,
    };
    let hours: i32 = value.get(1..3)?.parse().ok()?;
    let minutes: i32 = value.get(4..6)?.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
