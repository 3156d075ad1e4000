// src/decoder/reading.rs

use alloc::string::String;
use core::fmt;

use crate::common::types::SensorMode;

/// Title shown while no sensor type is selected.
pub const SELECT_SENSOR_TITLE: &str = "Select sensor type in Settings";
/// Title shown until the first frame of the selected type arrives.
pub const WAITING_TITLE: &str = "Waiting for data...";
/// Prefix of the title once a frame has been decoded.
pub const LAST_UPDATE_PREFIX: &str = "Last update at ";

/// Display value of one field slot.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum FieldValue {
    /// Nothing decoded yet.
    #[default]
    Empty,
    /// Fixed label such as `"NA"`, `"OFF"` or `"LO"`.
    Text(&'static str),
    /// Plain decimal value.
    Number(u32),
    /// Value on a fixed scale, shown as `"<level>/<of>"`.
    Level { level: u8, of: u8 },
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Empty => Ok(()),
            FieldValue::Text(text) => f.write_str(text),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Level { level, of } => write!(f, "{}/{}", level, of),
        }
    }
}

/// One caption/value pair on the reading screen.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Field {
    pub caption: &'static str,
    pub value: FieldValue,
}

impl Field {
    pub const fn blank(caption: &'static str) -> Self {
        Field { caption, value: FieldValue::Empty }
    }
}

/// Everything the reading screen shows: a title and four fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedReading {
    pub title: String,
    /// Layout the captions belong to.
    pub mode: SensorMode,
    pub fields: [Field; 4],
}

impl DecodedReading {
    /// The reading shown when no sensor type is selected.
    pub fn placeholder() -> Self {
        DecodedReading {
            title: String::from(SELECT_SENSOR_TITLE),
            mode: SensorMode::None,
            fields: [Field::default(); 4],
        }
    }

    /// Blank reading with the given captions.
    pub fn with_captions(mode: SensorMode, captions: [&'static str; 4]) -> Self {
        DecodedReading {
            title: String::from(WAITING_TITLE),
            mode,
            fields: captions.map(Field::blank),
        }
    }

    /// Looks a field up by caption.
    pub fn field(&self, caption: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.caption == caption)
    }

    /// Display text of the field with this caption.
    pub fn value_text(&self, caption: &str) -> Option<String> {
        use alloc::string::ToString;
        self.field(caption).map(|f| f.value.to_string())
    }
}

impl Default for DecodedReading {
    fn default() -> Self {
        Self::placeholder()
    }
}

impl fmt::Display for DecodedReading {
    /// Title on the first line, then one `caption: value` line per captioned field.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)?;
        for field in self.fields.iter().filter(|field| !field.caption.is_empty()) {
            write!(f, "\n{}: {}", field.caption, field.value)?;
        }
        Ok(())
    }
}
