// src/decoder/loac.rs

//! LOAC frames (type byte `0x37`). Only conductivity is decoded; it is a
//! big-endian word at positions 17 (high) and 18 (low), in hundredths.

use super::reading::{Field, FieldValue};
use super::{check_type, update_field};
use crate::common::error::TelemetryError;
use crate::common::frame::RawFrame;

pub const TYPE_TOKEN: &str = "37";

pub const MIN_TOKENS: usize = 19;

pub const CAPTIONS: [&str; 4] = ["pH", "ORP", "Chlorine", "Conductivity"];

const CONDUCTIVITY_HIGH: usize = 17;
const CONDUCTIVITY_LOW: usize = 18;
const CONDUCTIVITY_DIVISOR: u16 = 100;

/// Shown in the slots this layout does not decode yet.
const NOT_AVAILABLE: FieldValue = FieldValue::Text("NA");

/// Conductivity word to display units, truncating.
pub fn conductivity(raw: u16) -> FieldValue {
    FieldValue::Number(u32::from(raw / CONDUCTIVITY_DIVISOR))
}

pub(crate) fn apply(frame: &RawFrame, fields: &mut [Field; 4]) -> Result<(), TelemetryError> {
    check_type(frame, TYPE_TOKEN)?;
    frame.require(MIN_TOKENS)?;

    let [ph, orp, chlorine, cond] = fields;
    ph.value = NOT_AVAILABLE;
    orp.value = NOT_AVAILABLE;
    chlorine.value = NOT_AVAILABLE;
    update_field(
        cond,
        frame
            .word_be(CONDUCTIVITY_HIGH, CONDUCTIVITY_LOW)
            .map(|w| Some(conductivity(w))),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::frame::tokenize;

    fn blank() -> [Field; 4] {
        CAPTIONS.map(Field::blank)
    }

    fn frame_with(high: &str, low: &str) -> RawFrame {
        tokenize(&alloc::format!(
            "0x01 0x37 {} 0x{} 0x{}",
            ["0x00"; 15].join(" "),
            high,
            low
        ))
    }

    #[test]
    fn test_conductivity() {
        assert_eq!(conductivity(500), FieldValue::Number(5));
        assert_eq!(conductivity(599), FieldValue::Number(5));
        assert_eq!(conductivity(99), FieldValue::Number(0));
        assert_eq!(conductivity(u16::MAX), FieldValue::Number(655));
    }

    #[test]
    fn test_apply_composes_word() {
        let mut fields = blank();
        apply(&frame_with("01", "f4"), &mut fields).unwrap();
        assert_eq!(fields[3].value, FieldValue::Number(5));
        assert_eq!(fields[0].value, FieldValue::Text("NA"));
        assert_eq!(fields[1].value, FieldValue::Text("NA"));
        assert_eq!(fields[2].value, FieldValue::Text("NA"));

        // High byte really is position 17
        apply(&frame_with("f4", "01"), &mut fields).unwrap();
        assert_eq!(fields[3].value, FieldValue::Number(0xf401 / 100));
    }

    #[test]
    fn test_apply_malformed_word_keeps_previous() {
        let mut fields = blank();
        apply(&frame_with("01", "f4"), &mut fields).unwrap();
        apply(&frame_with("0g", "f4"), &mut fields).unwrap();
        assert_eq!(fields[3].value, FieldValue::Number(5));
    }

    #[test]
    fn test_apply_rejects_short_and_foreign_frames() {
        let mut fields = blank();
        assert!(matches!(
            apply(&tokenize("0x01 0x37 0x00 0x01 0xf4"), &mut fields),
            Err(TelemetryError::ShortFrame { needed: 19, got: 5 })
        ));
        assert!(matches!(
            apply(&tokenize("0x01 0x29 0x00"), &mut fields),
            Err(TelemetryError::TypeMismatch { expected: "37", .. })
        ));
        assert_eq!(fields, blank());
    }
}
