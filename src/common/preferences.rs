// src/common/preferences.rs

use super::hal_traits::Preferences;
use super::types::{LineTerminator, ReceivedMessageOption, SensorMode};
use crate::decoder::FwssField;

/// Settings as the app persists them: one small integer per key.
///
/// Values are converted on every read, so an out-of-range value written by an
/// older or newer app version degrades to the default instead of failing.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct StoredPreferences {
    pub sensor_mode: u8,
    pub message_option: u8,
    pub received_message_option: u8,
    pub fwss_option: u8,
}

impl StoredPreferences {
    pub const fn new(sensor_mode: u8, message_option: u8, received_message_option: u8) -> Self {
        StoredPreferences { sensor_mode, message_option, received_message_option, fwss_option: 0 }
    }

    /// Builds the raw form of already-typed settings.
    pub fn from_typed(
        sensor_mode: SensorMode,
        terminator: LineTerminator,
        received: ReceivedMessageOption,
    ) -> Self {
        StoredPreferences::new(sensor_mode as u8, terminator as u8, received as u8)
    }

    pub fn set_sensor_mode(&mut self, mode: SensorMode) {
        self.sensor_mode = mode as u8;
    }

    pub fn set_line_terminator(&mut self, terminator: LineTerminator) {
        self.message_option = terminator as u8;
    }

    pub fn set_fwss_field(&mut self, field: Option<FwssField>) {
        self.fwss_option = field.map_or(0, |f| f as u8);
    }
}

impl Preferences for StoredPreferences {
    fn sensor_mode(&self) -> SensorMode {
        SensorMode::from_u8(self.sensor_mode)
    }

    fn line_terminator(&self) -> LineTerminator {
        LineTerminator::from_u8(self.message_option)
    }

    fn received_message_option(&self) -> ReceivedMessageOption {
        ReceivedMessageOption::from_u8(self.received_message_option)
    }

    fn fwss_field(&self) -> Option<FwssField> {
        FwssField::from_u8(self.fwss_option)
    }
}
