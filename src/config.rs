//! System configuration parameters
//!
//! All tunable parameters for the sensor panel.  These are fixed for the
//! lifetime of a run: the simulator loads them once from JSON (or uses the
//! defaults), nothing is discovered or changed at runtime.

use core::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Thermistor and divider constants used by the analog bank.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThermistorConfig {
    /// Nominal resistance at `t0_kelvin` (ohms).
    pub r0_ohms: f32,
    /// Beta coefficient (kelvin).
    pub beta: f32,
    /// Reference temperature for `r0_ohms` (kelvin).
    pub t0_kelvin: f32,
    /// Fixed resistor in the voltage divider (ohms).
    pub divider_ohms: f32,
}

impl Default for ThermistorConfig {
    fn default() -> Self {
        // Grove temperature sensor v1.2: 10 kOhm NTC, B = 4275.
        Self {
            r0_ohms: 10_000.0,
            beta: 4275.0,
            t0_kelvin: 298.15,
            divider_ohms: 10_000.0,
        }
    }
}

/// Core panel configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    // --- Polling ---
    /// Digital temperature/humidity sensor polling period (milliseconds)
    pub digital_poll_interval_ms: u32,
    /// Analog thermistor polling period (milliseconds)
    pub analog_poll_interval_ms: u32,
    /// Touch panel polling period (milliseconds)
    pub touch_poll_interval_ms: u32,

    // --- Touch selector ---
    /// Minimum time since the switch's last transition before a tap
    /// toggles the active bank (milliseconds)
    pub debounce_window_ms: u32,
    /// Taps must land strictly below this row (pixels from the top) to count
    pub touch_min_y: i32,
    /// Whether a bank toggle alone re-renders the panel with stored data
    pub rerender_on_toggle: bool,

    // --- Real time ---
    /// How far a real-time run may lag the wall clock before it halts
    /// (milliseconds)
    pub missed_deadline_tolerance_ms: u32,

    // --- Analog bank ---
    pub thermistor: ThermistorConfig,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            // Polling
            digital_poll_interval_ms: 1000, // 1 Hz
            analog_poll_interval_ms: 1000,  // 1 Hz
            touch_poll_interval_ms: 100,    // 10 Hz

            // Touch selector
            debounce_window_ms: 100,
            touch_min_y: 200, // bottom strip of the 240x320 panel
            rerender_on_toggle: true,

            // Real time
            missed_deadline_tolerance_ms: 1000,

            // Analog bank
            thermistor: ThermistorConfig::default(),
        }
    }
}

impl PanelConfig {
    /// Reject values that would stall the network or break the
    /// thermistor equation.  Invalid values are never clamped.
    pub fn validate(&self) -> Result<()> {
        if self.digital_poll_interval_ms == 0 {
            return Err(Error::Config("digital poll interval must be non-zero"));
        }
        if self.analog_poll_interval_ms == 0 {
            return Err(Error::Config("analog poll interval must be non-zero"));
        }
        if self.touch_poll_interval_ms == 0 {
            return Err(Error::Config("touch poll interval must be non-zero"));
        }
        if self.missed_deadline_tolerance_ms == 0 {
            return Err(Error::Config("missed deadline tolerance must be non-zero"));
        }
        let t = &self.thermistor;
        if !(t.r0_ohms.is_finite() && t.r0_ohms > 0.0) {
            return Err(Error::Config("thermistor r0 must be positive"));
        }
        if !(t.beta.is_finite() && t.beta > 0.0) {
            return Err(Error::Config("thermistor beta must be positive"));
        }
        if !(t.t0_kelvin.is_finite() && t.t0_kelvin > 0.0) {
            return Err(Error::Config("thermistor t0 must be above absolute zero"));
        }
        if !(t.divider_ohms.is_finite() && t.divider_ohms > 0.0) {
            return Err(Error::Config("divider resistor must be positive"));
        }
        Ok(())
    }

    pub fn digital_poll_interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.digital_poll_interval_ms))
    }

    pub fn analog_poll_interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.analog_poll_interval_ms))
    }

    pub fn touch_poll_interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.touch_poll_interval_ms))
    }

    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(u64::from(self.debounce_window_ms))
    }

    pub fn missed_deadline_tolerance(&self) -> Duration {
        Duration::from_millis(u64::from(self.missed_deadline_tolerance_ms))
    }
}
