//! NTC thermistor conversion (10 kOhm @ 25 C, B = 4275 by default).
//!
//! The thermistor sits in a voltage divider with a fixed resistor; the
//! analog source reports the divider output as a fraction of the
//! reference voltage.  The Beta (simplified Steinhart-Hart) equation
//! converts the resulting resistance to temperature:
//!
//! ```text
//! R = R_div * (1/x - 1)
//! T = 1 / (ln(R/R0)/B + 1/T0) - 273.15
//! ```

use crate::config::ThermistorConfig;
use crate::readings::Sample;

const KELVIN_OFFSET: f32 = 273.15;

/// Thermistor resistance for a normalised divider signal.
///
/// Signals at or beyond the rails (0.0, 1.0) mean an open or shorted
/// thermistor and have no finite resistance.
pub fn resistance_ohms(signal: f32, cfg: &ThermistorConfig) -> Option<f32> {
    if !(signal > 0.0 && signal < 1.0) {
        return None;
    }
    Some(cfg.divider_ohms * (1.0 / signal - 1.0))
}

/// Convert a normalised divider signal to degrees Celsius.
pub fn signal_to_celsius(signal: Sample, cfg: &ThermistorConfig) -> Sample {
    let r = resistance_ohms(signal?, cfg)?;
    let inv_t = (r / cfg.r0_ohms).ln() / cfg.beta + 1.0 / cfg.t0_kelvin;
    if !(inv_t.is_finite() && inv_t > 0.0) {
        return None;
    }
    Some(1.0 / inv_t - KELVIN_OFFSET)
}
