//! Values that flow between the models.
//!
//! A failed sensor read is an explicit `None`, never a floating-point
//! sentinel.  NaN coming from a driver is converted once, at the boundary,
//! by [`sample_from_raw`]; from then on no arithmetic can silently carry it.

use core::fmt;
use core::time::Duration;

use serde::{Deserialize, Serialize};

use crate::display::bounded_text;

/// Longest bank name kept in a reading.
pub const NAME_CHARS: usize = 16;

/// One temperature or humidity sample.  `None` = the read failed.
pub type Sample = Option<f32>;

/// Map a raw driver value onto a [`Sample`]: NaN and infinities are failures.
pub fn sample_from_raw(raw: f32) -> Sample {
    raw.is_finite().then_some(raw)
}

// ---------------------------------------------------------------------------
// Sensor reading
// ---------------------------------------------------------------------------

/// The record a bank hands to the formatter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// Bank name shown as the panel title.
    pub name: heapless::String<NAME_CHARS>,
    /// Degrees Celsius.
    pub temperature: Sample,
    /// Relative humidity in percent.
    pub humidity: Sample,
}

impl SensorReading {
    /// An empty reading: both fields unknown until the first sample lands.
    pub fn named(name: &str) -> Self {
        Self {
            name: bounded_text(name),
            temperature: None,
            humidity: None,
        }
    }

    pub fn with_values(name: &str, temperature: Sample, humidity: Sample) -> Self {
        Self {
            name: bounded_text(name),
            temperature,
            humidity,
        }
    }
}

// ---------------------------------------------------------------------------
// Touch
// ---------------------------------------------------------------------------

/// Panel coordinates of a detected contact.  Only produced on contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TouchEvent {
    pub x: i32,
    pub y: i32,
}

impl TouchEvent {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

// ---------------------------------------------------------------------------
// Bank selection
// ---------------------------------------------------------------------------

/// One of the two redundant temperature sources tracked by the switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Bank {
    /// Digital temperature/humidity sensor.
    #[default]
    Digital = 0,
    /// Analog thermistor (no humidity channel).
    Analog = 1,
}

impl Bank {
    /// Number of banks; sizes the switch's record array.
    pub const COUNT: usize = 2;

    pub const ALL: [Self; Self::COUNT] = [Self::Digital, Self::Analog];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn toggled(self) -> Self {
        match self {
            Self::Digital => Self::Analog,
            Self::Analog => Self::Digital,
        }
    }

    /// Title shown on the panel when this bank is active.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Digital => "Digital",
            Self::Analog => "Analog",
        }
    }
}

impl fmt::Display for Bank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which bank feeds the panel, and when it last changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectorState {
    pub active: Bank,
    /// Switch-local time of the most recent toggle.
    pub last_toggle: Duration,
}
