// src/common/error.rs

use alloc::string::String;

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError<E = ()>
where
    E: core::fmt::Debug, // Debug is enough for the link error message
{
    /// Underlying error from the serial link.
    #[error("Link error: {0:?}")]
    Link(E),

    /// A token expected to be a hex byte did not parse.
    #[error("Malformed token {token:?} at position {position}")]
    MalformedToken { position: usize, token: String },

    /// Fewer tokens than the layout requires.
    #[error("Short frame: needed {needed} tokens, got {got}")]
    ShortFrame { needed: usize, got: usize },

    /// Frame-type token does not belong to the active sensor mode.
    #[error("Frame type mismatch: expected {expected:?}, got {got:?}")]
    TypeMismatch { expected: &'static str, got: String },

    /// Persisted sensor mode outside the known set.
    #[error("Unknown sensor mode: {0}")]
    UnknownMode(u8),

    /// Persisted line terminator outside the known set.
    #[error("Unknown line terminator: {0}")]
    UnknownTerminator(u8),

    /// Persisted received-message option outside the known set.
    #[error("Unknown received message option: {0}")]
    UnknownReceivedOption(u8),

    /// Framed message does not fit the output buffer.
    #[error("Buffer overflow: needed {needed}, got {got}")]
    BufferOverflow { needed: usize, got: usize },
}
