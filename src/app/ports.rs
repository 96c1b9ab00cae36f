//! Port traits: the boundary between the model network and the outside world.
//!
//! ```text
//!   Driver / log ──▶ Port trait ──▶ source models ──▶ Panel ──▶ DisplaySink
//! ```
//!
//! Hardware drivers, recorded logs and test doubles implement these traits.
//! The models consume them through trait objects, so swapping a live I2C
//! sensor for a replay file is invisible to the switch and the arbiter.
//!
//! ## Contract notes
//!
//! - Drivers never fail loudly: a bad read is a `None` sample.
//! - "No contact" on the touch panel is `None`, never a zero coordinate.
//! - Sinks swallow their own I/O problems; nothing flows back into the core.

use core::time::Duration;

use crate::display::DisplayUpdate;
use crate::readings::{Sample, TouchEvent};

use super::events::PanelEvent;

// ───────────────────────────────────────────────────────────────
// Sensor ports (driven adapters: hardware → models)
// ───────────────────────────────────────────────────────────────

/// One poll of the digital temperature/humidity sensor.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClimateSample {
    /// Degrees Celsius, `None` if the read failed.
    pub temperature: Sample,
    /// Relative humidity (%), `None` if the read failed.
    pub humidity: Sample,
}

impl ClimateSample {
    pub const FAILED: Self = Self {
        temperature: None,
        humidity: None,
    };

    pub const fn new(temperature: f32, humidity: f32) -> Self {
        Self {
            temperature: Some(temperature),
            humidity: Some(humidity),
        }
    }
}

/// Digital temperature/humidity sensor.
pub trait ClimateDriver {
    fn poll(&mut self) -> ClimateSample;
}

/// Analog thermistor divider, read as a fraction of the reference voltage.
pub trait AnalogDriver {
    /// Normalised 0.0–1.0 signal, `None` if the conversion failed.
    fn sample(&mut self) -> Sample;
}

/// Resistive/capacitive touch controller.
pub trait TouchDriver {
    /// Coordinates of the current contact, `None` when nothing touches.
    fn poll(&mut self) -> Option<TouchEvent>;
}

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: models → panel)
// ───────────────────────────────────────────────────────────────

/// Accepts complete panel updates.  Each update redraws the whole panel.
pub trait DisplaySink {
    fn render(&mut self, update: &DisplayUpdate);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: coordinator → logging)
// ───────────────────────────────────────────────────────────────

/// The coordinator reports lifecycle and transition events through this
/// port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &PanelEvent);
}

// ───────────────────────────────────────────────────────────────
// Clock port (real-time pacing)
// ───────────────────────────────────────────────────────────────

/// Wall-clock source used when the network runs against real hardware.
pub trait ClockPort {
    /// Time since the run started.
    fn now(&self) -> Duration;

    /// Block until `deadline` (run-relative).  Returns immediately if it
    /// already passed.
    fn sleep_until(&mut self, deadline: Duration);
}
