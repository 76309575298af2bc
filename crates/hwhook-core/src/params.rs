//! Parameter parser for `hw_params` records.
//!
//! The kernel describes a configured substream as a list of `key: value`
//! lines:
//!
//! ```text
//! access: RW_INTERLEAVED
//! format: S16_LE
//! subformat: STD
//! channels: 2
//! rate: 48000 (48000/1)
//! period_size: 1024
//! buffer_size: 4096
//! ```
//!
//! Only `format`, `rate` and `channels` are extracted. Every line is scanned
//! and a later occurrence of a key overwrites an earlier one. The parser never
//! fails: fields it cannot find keep their sentinel values, see
//! [`HardwareParameters::is_complete`].

use std::fmt;

/// Maximum number of characters kept from a `format` value.
pub const FORMAT_MAX_LEN: usize = 20;

/// Sentinel for a numeric field that was not found.
pub const UNSET: i32 = -1;

/// Negotiated hardware parameters of a stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HardwareParameters {
    /// Sample format name, e.g. `S16_LE`. Empty when not found.
    pub format: String,
    /// Sample rate in Hz, or [`UNSET`].
    pub rate: i32,
    /// Channel count, or [`UNSET`].
    pub channels: i32,
}

impl Default for HardwareParameters {
    fn default() -> Self {
        Self {
            format: String::new(),
            rate: UNSET,
            channels: UNSET,
        }
    }
}

impl HardwareParameters {
    /// Build a fully specified parameter set.
    pub fn new(format: impl Into<String>, rate: i32, channels: i32) -> Self {
        Self {
            format: format.into(),
            rate,
            channels,
        }
    }

    /// Parse a sequence of record lines.
    ///
    /// Unknown lines are ignored and the last occurrence of each recognized
    /// key wins.
    pub fn parse<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut params = Self::default();
        for line in lines {
            params.apply_line(line.as_ref());
        }
        params
    }

    /// Parse a whole record held in memory.
    pub fn from_text(text: &str) -> Self {
        Self::parse(text.lines())
    }

    /// `true` when every field was found.
    pub fn is_complete(&self) -> bool {
        !self.format.is_empty() && self.rate != UNSET && self.channels != UNSET
    }

    fn apply_line(&mut self, line: &str) {
        if let Some(value) = field(line, "format")
            && let Some(token) = value.split_whitespace().next()
        {
            self.format = token.chars().take(FORMAT_MAX_LEN).collect();
        }
        if let Some(value) = field(line, "channels")
            && let Some(channels) = leading_int(value)
        {
            self.channels = channels;
        }
        if let Some(value) = field(line, "rate")
            && let Some(rate) = leading_int(value)
        {
            self.rate = rate;
        }
    }
}

impl fmt::Display for HardwareParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.format, self.rate, self.channels)
    }
}

/// Value part of `line` when it starts with `<key>:`.
fn field<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    line.strip_prefix(key)?.strip_prefix(':')
}

/// Leading signed decimal integer, skipping leading whitespace.
///
/// Anything after the digits is ignored (`48000 (48000/1)` yields 48000).
/// Returns `None` when there are no digits or the value overflows `i32`.
fn leading_int(value: &str) -> Option<i32> {
    let value = value.trim_start();
    let sign_len = usize::from(value.starts_with(['+', '-']));
    let digits = value[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits == 0 {
        return None;
    }
    value[..sign_len + digits].parse().ok()
}
