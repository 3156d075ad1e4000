// src/lib.rs

//! Telemetry decoding for water-treatment sensors behind an HM-10 style
//! serial/Bluetooth link.
//!
//! Received messages are space-separated hex byte tokens. [`decoder::decode`]
//! turns them into the four-field reading screen for the selected sensor type
//! (FWSS or LOAC), and [`common::command::frame`] adds the configured line ending to
//! outgoing commands. [`terminal::SerialTerminal`] wires both to the link,
//! settings and display collaborators.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod common;
pub mod decoder;
pub mod terminal;

// Re-export key types for convenience
pub use common::{LineTerminator, RawFrame, SensorMode, TelemetryError};
pub use decoder::{decode, DecodedReading, DecoderState, Timestamp};
pub use terminal::SerialTerminal;
