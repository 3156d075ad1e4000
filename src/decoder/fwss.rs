// src/decoder/fwss.rs

//! FWSS frames (type byte `0x29`).
//!
//! | position | field |
//! |---|---|
//! | 7 | spa output level |
//! | 8 | 10 day timer |
//! | 9 | saline test data (low two bits) |
//! | 10 | 4 month timer |
//! | 11 | current operating voltage |
//! | 12 | generation in progress |
//! | 13 | error codes |
//! | 14..=16 | cumulative generation cycle count, position 16 most significant |
//! | 17 | firmware revision |
//! | 18 | cartridge status |
//!
//! Only the first four are shown on the reading screen.

use super::reading::{Field, FieldValue};
use super::{check_type, update_field};
use crate::common::error::TelemetryError;
use crate::common::frame::RawFrame;

pub const TYPE_TOKEN: &str = "29";

/// Tokens needed for the four displayed fields.
pub const MIN_TOKENS: usize = 11;
/// Tokens needed for the diagnostic fields as well.
pub const FULL_TOKENS: usize = 19;

pub const CAPTIONS: [&str; 4] = [
    "Spa Output level",
    "10 day timer",
    "Saline test data",
    "4 month timer",
];

/// Steps on the spa output level scale.
pub const OUTPUT_LEVEL_STEPS: u8 = 10;

/// Every field carried by an FWSS frame.
///
/// The discriminants are the values stored for the selected-field setting;
/// `0` there means no field is selected.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum FwssField {
    SpaOutputLevel = 1,
    TenDayTimer,
    SalineTestData,
    FourMonthTimer,
    /// Cell output.
    CurrentOperatingVoltage,
    /// Status.
    GenerationInProgress,
    ErrorCodes,
    /// Cycle meter.
    CumulativeGenerationCycleCount,
    FirmwareRevision,
    CartridgeStatus,
}

impl FwssField {
    pub const ALL: [FwssField; 10] = [
        FwssField::SpaOutputLevel,
        FwssField::TenDayTimer,
        FwssField::SalineTestData,
        FwssField::FourMonthTimer,
        FwssField::CurrentOperatingVoltage,
        FwssField::GenerationInProgress,
        FwssField::ErrorCodes,
        FwssField::CumulativeGenerationCycleCount,
        FwssField::FirmwareRevision,
        FwssField::CartridgeStatus,
    ];

    /// Lenient conversion from the stored setting: `0` and unknown values
    /// select nothing.
    pub fn from_u8(value: u8) -> Option<FwssField> {
        match value {
            0 => None,
            n => Self::ALL.get(usize::from(n) - 1).copied(),
        }
    }

    /// Token positions, most significant first.
    pub const fn positions(&self) -> &'static [usize] {
        match self {
            FwssField::SpaOutputLevel => &[7],
            FwssField::TenDayTimer => &[8],
            FwssField::SalineTestData => &[9],
            FwssField::FourMonthTimer => &[10],
            FwssField::CurrentOperatingVoltage => &[11],
            FwssField::GenerationInProgress => &[12],
            FwssField::ErrorCodes => &[13],
            FwssField::CumulativeGenerationCycleCount => &[16, 15, 14],
            FwssField::FirmwareRevision => &[17],
            FwssField::CartridgeStatus => &[18],
        }
    }

    /// Raw value of this field; multi-byte fields are big-endian.
    pub fn read(&self, frame: &RawFrame) -> Result<u32, TelemetryError> {
        self.positions()
            .iter()
            .try_fold(0u32, |acc, &position| -> Result<u32, TelemetryError> {
                Ok((acc << 8) | u32::from(frame.byte(position)?))
            })
    }
}

/// Reads one raw field from an FWSS frame.
///
/// Frames of another type are rejected with `TypeMismatch`.
pub fn fwss_field(frame: &RawFrame, field: FwssField) -> Result<u32, TelemetryError> {
    check_type(frame, TYPE_TOKEN)?;
    field.read(frame)
}

/// Spa output level: `0xff` means not available, `0` means off, anything else
/// is scaled down to tenths.
pub fn spa_output_level(raw: u8) -> FieldValue {
    match raw {
        0xff => FieldValue::Text("NA"),
        0 => FieldValue::Text("OFF"),
        v => {
            // floor(10 * v / 255), exact in integers
            let level = (u16::from(OUTPUT_LEVEL_STEPS) * u16::from(v)) / 255;
            FieldValue::Level { level: level as u8, of: OUTPUT_LEVEL_STEPS }
        }
    }
}

/// Saline test result from the low two bits. Pattern `0b10` has no label.
pub fn saline_test(raw: u8) -> Option<FieldValue> {
    match raw & 0x3 {
        0 => Some(FieldValue::Text("OK")),
        1 => Some(FieldValue::Text("HI")),
        3 => Some(FieldValue::Text("LO")),
        _ => None,
    }
}

/// Decodes the displayed fields into `fields`.
///
/// Frame-level failures return before anything is written. A malformed field
/// token only leaves that one field as it was.
pub(crate) fn apply(frame: &RawFrame, fields: &mut [Field; 4]) -> Result<(), TelemetryError> {
    check_type(frame, TYPE_TOKEN)?;
    frame.require(MIN_TOKENS)?;

    let [level, ten_day, saline, four_month] = fields;
    update_field(level, frame.byte(7).map(|v| Some(spa_output_level(v))));
    update_field(ten_day, frame.byte(8).map(|v| Some(FieldValue::Number(v.into()))));
    update_field(saline, frame.byte(9).map(saline_test));
    update_field(four_month, frame.byte(10).map(|v| Some(FieldValue::Number(v.into()))));
    Ok(())
}

/// The FWSS fields that are not shown on the reading screen.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct FwssDiagnostics {
    pub operating_voltage: Option<u8>,
    pub generation_in_progress: Option<u8>,
    pub error_code: Option<u8>,
    pub cycle_count: Option<u32>,
    pub firmware_revision: Option<u8>,
    pub cartridge_status: Option<u8>,
}

impl FwssDiagnostics {
    /// Needs the FWSS type token and all 19 tokens; each field is `None` if its
    /// own token is malformed.
    pub fn decode(frame: &RawFrame) -> Result<Self, TelemetryError> {
        check_type(frame, TYPE_TOKEN)?;
        frame.require(FULL_TOKENS)?;

        let byte = |field: FwssField| field.read(frame).ok().map(|v| v as u8);
        Ok(FwssDiagnostics {
            operating_voltage: byte(FwssField::CurrentOperatingVoltage),
            generation_in_progress: byte(FwssField::GenerationInProgress),
            error_code: byte(FwssField::ErrorCodes),
            cycle_count: FwssField::CumulativeGenerationCycleCount.read(frame).ok(),
            firmware_revision: byte(FwssField::FirmwareRevision),
            cartridge_status: byte(FwssField::CartridgeStatus),
        })
    }

    /// True when the device reports an error code other than zero.
    pub fn has_error(&self) -> bool {
        matches!(self.error_code, Some(code) if code != 0)
    }
}
