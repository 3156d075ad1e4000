// src/decoder/mod.rs

//! Sensor decoder: turns tokenized frames into the reading screen contents.
//!
//! Decoding is best effort. A frame of the wrong type, or too short for its
//! layout, changes nothing; a malformed byte only leaves its own field as it
//! was. None of this is reported to the user, it is only logged.

pub mod fwss;
pub mod loac;
mod reading;

pub use fwss::{fwss_field, FwssDiagnostics, FwssField};
pub use reading::{
    DecodedReading, Field, FieldValue, LAST_UPDATE_PREFIX, SELECT_SENSOR_TITLE, WAITING_TITLE,
};

use alloc::format;
use alloc::string::{String, ToString};
use tracing::{debug, trace, warn};

use crate::common::error::TelemetryError;
use crate::common::frame::RawFrame;
use crate::common::types::SensorMode;

/// Wall-clock time of a received frame.
pub type Timestamp = chrono::NaiveDateTime;

/// `strftime` pattern used in the "last update" title.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Decoder state carried from one frame to the next.
///
/// The freshness flags record whether a frame of each type has been decoded
/// since that mode was last active. `display` is what the screen currently
/// shows, so no-op calls and skipped fields can leave it as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecoderState {
    first_fwss_received: bool,
    first_loac_received: bool,
    display: DecodedReading,
}

impl DecoderState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn first_fwss_received(&self) -> bool {
        self.first_fwss_received
    }

    pub fn first_loac_received(&self) -> bool {
        self.first_loac_received
    }

    /// Has a frame for `mode` been decoded yet?
    pub fn is_fresh(&self, mode: SensorMode) -> bool {
        match mode {
            SensorMode::None => false,
            SensorMode::Fwss => self.first_fwss_received,
            SensorMode::Loac => self.first_loac_received,
        }
    }

    /// What the screen currently shows.
    pub fn display(&self) -> &DecodedReading {
        &self.display
    }

    /// Back to the "select sensor" screen with both flags cleared.
    pub fn reset(&mut self) {
        self.first_fwss_received = false;
        self.first_loac_received = false;
        self.display = DecodedReading::placeholder();
    }

    /// Puts up `mode`'s captions. Switching layouts blanks the values and
    /// makes the other layout stale; the title falls back to "waiting" until
    /// the mode is fresh.
    fn enter(&mut self, mode: SensorMode, captions: [&'static str; 4]) {
        if self.display.mode != mode {
            match mode {
                SensorMode::Fwss => self.first_loac_received = false,
                SensorMode::Loac => self.first_fwss_received = false,
                SensorMode::None => {}
            }
            self.display = DecodedReading::with_captions(mode, captions);
        }
        if !self.is_fresh(mode) {
            self.display.title = String::from(WAITING_TITLE);
        }
    }

    /// Marks `mode` fresh and the other layout stale.
    fn accept(&mut self, mode: SensorMode, now: &Timestamp) {
        self.first_fwss_received = mode == SensorMode::Fwss;
        self.first_loac_received = mode == SensorMode::Loac;
        self.display.title = last_update_title(now);
    }
}

/// `"Last update at <now>"`.
pub fn last_update_title(now: &Timestamp) -> String {
    format!("{}{}", LAST_UPDATE_PREFIX, now.format(TIMESTAMP_FORMAT))
}

/// Decodes one frame for the selected `mode` and returns the full reading to
/// show.
///
/// The returned reading is also kept in `state`; when the frame is rejected
/// it is the previous reading, with the captions of `mode`.
pub fn decode(
    frame: &RawFrame,
    mode: SensorMode,
    state: &mut DecoderState,
    now: &Timestamp,
) -> DecodedReading {
    let outcome = match mode {
        SensorMode::None => {
            state.reset();
            Ok(())
        }
        SensorMode::Fwss => {
            state.enter(mode, fwss::CAPTIONS);
            fwss::apply(frame, &mut state.display.fields)
        }
        SensorMode::Loac => {
            state.enter(mode, loac::CAPTIONS);
            loac::apply(frame, &mut state.display.fields)
        }
    };

    match outcome {
        Ok(()) if mode != SensorMode::None => {
            debug!(%mode, tokens = frame.len(), "frame accepted");
            state.accept(mode, now);
        }
        Ok(()) => trace!("no sensor selected, frame ignored"),
        Err(e) => debug!(%mode, tokens = frame.len(), "frame ignored: {}", e),
    }

    state.display.clone()
}

/// Checks the frame-type token.
pub(crate) fn check_type(frame: &RawFrame, expected: &'static str) -> Result<(), TelemetryError> {
    match frame.frame_type() {
        Some(token) if token == expected => Ok(()),
        other => Err(TelemetryError::TypeMismatch {
            expected,
            got: other.unwrap_or_default().to_string(),
        }),
    }
}

/// Writes a decoded value into its slot.
///
/// `Ok(None)` means the raw value has no display form and the slot keeps its
/// value; an error is logged and likewise leaves the slot alone.
pub(crate) fn update_field(slot: &mut Field, decoded: Result<Option<FieldValue>, TelemetryError>) {
    match decoded {
        Ok(Some(value)) => slot.value = value,
        Ok(None) => trace!(caption = slot.caption, "no display form, keeping previous value"),
        Err(e) => warn!(caption = slot.caption, "field not decoded: {}", e),
    }
}
