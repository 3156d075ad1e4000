// src/common/command.rs

//! Outgoing message framing.
//!
//! Commands typed by the user are sent as plain text with an optional line
//! ending. Nothing about the message itself is checked.

use alloc::string::String;
use arrayvec::ArrayString;

use super::error::TelemetryError;
use super::types::{LineTerminator, ReceivedMessageOption};

/// Appends `terminator` to `message`.
pub fn frame(message: &str, terminator: LineTerminator) -> String {
    let ending = terminator.as_str();
    let mut framed = String::with_capacity(message.len() + ending.len());
    framed.push_str(message);
    framed.push_str(ending);
    framed
}

/// Frames into a fixed-capacity buffer for links with a small write size.
///
/// Returns `BufferOverflow` instead of truncating.
pub fn frame_into<const N: usize>(
    message: &str,
    terminator: LineTerminator,
) -> Result<ArrayString<N>, TelemetryError> {
    let ending = terminator.as_str();
    let needed = message.len() + ending.len();
    if needed > N {
        return Err(TelemetryError::BufferOverflow { needed, got: N });
    }
    let mut framed = ArrayString::<N>::new();
    // Both pushes fit, checked above
    framed.push_str(message);
    framed.push_str(ending);
    Ok(framed)
}

/// Raw received message as shown in the log view.
pub fn echo(message: &str, option: ReceivedMessageOption) -> String {
    match option {
        ReceivedMessageOption::None => String::from(message),
        ReceivedMessageOption::Newline => {
            let mut line = String::with_capacity(message.len() + 1);
            line.push_str(message);
            line.push('\n');
            line
        }
    }
}
