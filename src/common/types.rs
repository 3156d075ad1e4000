// src/common/types.rs

use core::fmt;

use super::error::TelemetryError;
use crate::decoder::{fwss, loac};

// --- Sensor selection ---

/// Which telemetry layout the user has selected in settings.
///
/// Values are persisted as small integers; anything outside the known set is
/// read back as [`SensorMode::None`].
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum SensorMode {
    #[default]
    None = 0,
    Fwss = 1,
    Loac = 2,
}

impl SensorMode {
    /// Strict conversion from the persisted value.
    pub fn try_from_u8(value: u8) -> Result<Self, TelemetryError> {
        match value {
            0 => Ok(SensorMode::None),
            1 => Ok(SensorMode::Fwss),
            2 => Ok(SensorMode::Loac),
            other => Err(TelemetryError::UnknownMode(other)),
        }
    }

    /// Lenient conversion: unknown values select no sensor.
    pub fn from_u8(value: u8) -> Self {
        Self::try_from_u8(value).unwrap_or_default()
    }

    /// Frame-type token this mode accepts, if any.
    pub const fn type_token(&self) -> Option<&'static str> {
        match self {
            SensorMode::None => None,
            SensorMode::Fwss => Some(fwss::TYPE_TOKEN),
            SensorMode::Loac => Some(loac::TYPE_TOKEN),
        }
    }
}

impl fmt::Display for SensorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorMode::None => f.write_str("none"),
            SensorMode::Fwss => f.write_str("FWSS"),
            SensorMode::Loac => f.write_str("LOAC"),
        }
    }
}

impl core::str::FromStr for SensorMode {
    type Err = ();

    /// Accepts the display names, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("none") {
            Ok(SensorMode::None)
        } else if s.eq_ignore_ascii_case("fwss") {
            Ok(SensorMode::Fwss)
        } else if s.eq_ignore_ascii_case("loac") {
            Ok(SensorMode::Loac)
        } else {
            Err(())
        }
    }
}

// --- Outgoing line endings ---

/// Line ending appended to every outgoing message.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum LineTerminator {
    #[default]
    None = 0,
    Newline = 1,
    CarriageReturn = 2,
    CarriageReturnNewline = 3,
}

impl LineTerminator {
    pub fn try_from_u8(value: u8) -> Result<Self, TelemetryError> {
        match value {
            0 => Ok(LineTerminator::None),
            1 => Ok(LineTerminator::Newline),
            2 => Ok(LineTerminator::CarriageReturn),
            3 => Ok(LineTerminator::CarriageReturnNewline),
            other => Err(TelemetryError::UnknownTerminator(other)),
        }
    }

    /// Unknown values append nothing.
    pub fn from_u8(value: u8) -> Self {
        Self::try_from_u8(value).unwrap_or_default()
    }

    /// The bytes appended to the message.
    pub const fn as_str(&self) -> &'static str {
        match self {
            LineTerminator::None => "",
            LineTerminator::Newline => "\n",
            LineTerminator::CarriageReturn => "\r",
            LineTerminator::CarriageReturnNewline => "\r\n",
        }
    }
}

impl core::str::FromStr for LineTerminator {
    type Err = ();

    /// Short names used on the command line: `none`, `nl`, `cr`, `crnl`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(LineTerminator::None),
            "nl" => Ok(LineTerminator::Newline),
            "cr" => Ok(LineTerminator::CarriageReturn),
            "crnl" => Ok(LineTerminator::CarriageReturnNewline),
            _ => Err(()),
        }
    }
}

// --- Raw log echo ---

/// Whether a raw received message is echoed with a trailing newline.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum ReceivedMessageOption {
    #[default]
    None = 0,
    Newline = 1,
}

impl ReceivedMessageOption {
    pub fn try_from_u8(value: u8) -> Result<Self, TelemetryError> {
        match value {
            0 => Ok(ReceivedMessageOption::None),
            1 => Ok(ReceivedMessageOption::Newline),
            other => Err(TelemetryError::UnknownReceivedOption(other)),
        }
    }

    pub fn from_u8(value: u8) -> Self {
        Self::try_from_u8(value).unwrap_or_default()
    }
}
