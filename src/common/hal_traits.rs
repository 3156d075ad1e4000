// src/common/hal_traits.rs

use core::fmt::Debug;

use super::types::{LineTerminator, ReceivedMessageOption, SensorMode};
use crate::decoder::{DecodedReading, FwssField};

/// Abstraction for the outgoing side of the serial/Bluetooth link.
///
/// Connection management lives with the implementor; the terminal only ever
/// hands it complete, already-framed messages.
pub trait SerialLink {
    /// Associated error type for link failures.
    type Error: Debug;

    /// Attempts to queue one framed message for transmission.
    ///
    /// Returns `Err(nb::Error::WouldBlock)` if the link cannot take the message
    /// right now; the caller may retry with the same text.
    fn send(&mut self, framed: &str) -> nb::Result<(), Self::Error>;
}

/// Read access to the user's settings.
///
/// Every method is called at the moment the value is needed, so changes made
/// in settings take effect on the next frame or send.
pub trait Preferences {
    fn sensor_mode(&self) -> SensorMode;

    fn line_terminator(&self) -> LineTerminator;

    /// Defaults to no echo newline for stores that don't keep this option.
    fn received_message_option(&self) -> ReceivedMessageOption {
        ReceivedMessageOption::None
    }

    /// FWSS field picked for inspection, if any.
    fn fwss_field(&self) -> Option<FwssField> {
        None
    }
}

/// Where decoded readings are shown.
pub trait ReadingSink {
    /// Replaces the title and all four caption/value pairs at once.
    fn show(&mut self, reading: &DecodedReading);
}

impl<P: Preferences + ?Sized> Preferences for &P {
    fn sensor_mode(&self) -> SensorMode {
        (**self).sensor_mode()
    }

    fn line_terminator(&self) -> LineTerminator {
        (**self).line_terminator()
    }

    fn received_message_option(&self) -> ReceivedMessageOption {
        (**self).received_message_option()
    }

    fn fwss_field(&self) -> Option<FwssField> {
        (**self).fwss_field()
    }
}
