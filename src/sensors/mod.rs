//! Sensor source models: pure generators.
//!
//! Each source polls its driver on a fixed period and emits the latest
//! sample every time that period elapses.  None of them has input ports:
//! delivering input to one is a wiring defect and fails the run.
//!
//! | Model           | Driver port      | Emits                                |
//! |-----------------|------------------|--------------------------------------|
//! | `DigitalSensor` | `ClimateDriver`  | temperature + humidity, every period |
//! | `AnalogSensor`  | `AnalogDriver`   | divider signal, every period         |
//! | `TouchSensor`   | `TouchDriver`    | coordinates, only on contact         |

pub mod analog;
pub mod digital;
pub mod thermistor;
pub mod touch;

use log::error;

use crate::error::{ModelError, Result};

/// Shared external-transition body for every generator.
pub(crate) fn reject_input(model: &'static str) -> Result<()> {
    error!("{model}: external transition on a model with no input ports");
    Err(ModelError::NoInputPorts { model }.into())
}
