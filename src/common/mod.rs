// src/common/mod.rs

// --- Declare all public modules within common ---
pub mod command;
pub mod error;
pub mod frame;
pub mod hal_traits;
pub mod preferences;
pub mod types;

// --- Re-export key types/traits/functions for easier access ---

// From command.rs
pub use command::{echo, frame, frame_into};

// From error.rs
pub use error::TelemetryError;

// From frame.rs
pub use frame::{tokenize, RawFrame};

// From hal_traits.rs
pub use hal_traits::{Preferences, ReadingSink, SerialLink};

// From preferences.rs
pub use preferences::StoredPreferences;

// From types.rs
pub use types::{LineTerminator, ReceivedMessageOption, SensorMode};
