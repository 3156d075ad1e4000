// src/common/frame.rs

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use super::error::TelemetryError;

/// Literal marker some firmware revisions prefix to every byte.
pub const HEX_MARKER: &str = "0x";
/// Separator between byte tokens on the wire.
pub const TOKEN_SEPARATOR: char = ' ';

/// Position of the frame-type byte.
pub const TYPE_POSITION: usize = 1;

/// One received telemetry message, split into its byte tokens.
///
/// Position 0 is header context, position 1 is the frame-type byte and
/// everything from position 2 on is payload. Tokens are kept exactly as
/// received; they are only interpreted as hex when a field is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFrame {
    tokens: Vec<String>,
}

impl RawFrame {
    /// Tokenizes a received message.
    ///
    /// Every `"0x"` is removed (case-sensitive) and the rest is split on single
    /// spaces with no trimming, so `""` gives one empty token and a double space
    /// gives an empty token between them.
    pub fn tokenize(raw: &str) -> Self {
        let cleaned = raw.replace(HEX_MARKER, "");
        let tokens = cleaned.split(TOKEN_SEPARATOR).map(|t| t.to_string()).collect();
        RawFrame { tokens }
    }

    /// Number of tokens, including header and type.
    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Token at `position`, verbatim.
    #[inline]
    pub fn token(&self, position: usize) -> Option<&str> {
        self.tokens.get(position).map(String::as_str)
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    /// The frame-type token, if the frame is long enough to have one.
    #[inline]
    pub fn frame_type(&self) -> Option<&str> {
        self.token(TYPE_POSITION)
    }

    /// Fails with `ShortFrame` unless positions `0..needed` all exist.
    pub fn require(&self, needed: usize) -> Result<(), TelemetryError> {
        if self.tokens.len() < needed {
            Err(TelemetryError::ShortFrame { needed, got: self.tokens.len() })
        } else {
            Ok(())
        }
    }

    /// Parses the token at `position` as one unsigned hex byte.
    pub fn byte(&self, position: usize) -> Result<u8, TelemetryError> {
        let token = self
            .token(position)
            .ok_or(TelemetryError::ShortFrame { needed: position + 1, got: self.len() })?;
        u8::from_str_radix(token, 16).map_err(|_| TelemetryError::MalformedToken {
            position,
            token: token.to_string(),
        })
    }

    /// Big-endian word from two byte tokens, `high` supplying the upper byte.
    pub fn word_be(&self, high: usize, low: usize) -> Result<u16, TelemetryError> {
        Ok(u16::from_be_bytes([self.byte(high)?, self.byte(low)?]))
    }

    /// Big-endian 24-bit value, `positions[0]` most significant.
    pub fn triple_be(&self, positions: [usize; 3]) -> Result<u32, TelemetryError> {
        let [hi, mid, lo] = positions;
        Ok(u32::from_be_bytes([0, self.byte(hi)?, self.byte(mid)?, self.byte(lo)?]))
    }
}

/// Free-function form of [`RawFrame::tokenize`].
pub fn tokenize(raw: &str) -> RawFrame {
    RawFrame::tokenize(raw)
}
