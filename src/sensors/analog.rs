//! Analog thermistor source.
//!
//! Emits the raw divider signal (0.0–1.0).  Conversion to Celsius is the
//! switch's job, so a recorded log of raw signals replays exactly.

use core::fmt;
use core::time::Duration;

use log::debug;

use crate::app::ports::AnalogDriver;
use crate::error::Result;
use crate::model::{Atomic, Bag, Message, Port, emit};
use crate::readings::Sample;
use crate::time::TimeAdvance;

use super::reject_input;

pub struct AnalogSensor {
    name: &'static str,
    driver: Box<dyn AnalogDriver>,
    period: Duration,
    latest: Sample,
}

impl AnalogSensor {
    pub fn new(name: &'static str, driver: impl AnalogDriver + 'static, period: Duration) -> Self {
        let mut driver: Box<dyn AnalogDriver> = Box::new(driver);
        let latest = driver.sample();
        Self {
            name,
            driver,
            period,
            latest,
        }
    }

    pub fn latest(&self) -> Sample {
        self.latest
    }
}

impl Atomic for AnalogSensor {
    fn name(&self) -> &'static str {
        self.name
    }

    fn input_ports(&self) -> &'static [Port] {
        &[]
    }

    fn time_advance(&self) -> TimeAdvance {
        TimeAdvance::After(self.period)
    }

    fn internal_transition(&mut self) {
        self.latest = self.driver.sample();
        if self.latest.is_none() {
            debug!("{}: conversion failed", self.name);
        }
    }

    fn external_transition(&mut self, _elapsed: Duration, _inputs: &Bag) -> Result<()> {
        reject_input(self.name)
    }

    fn output(&self) -> Result<Bag> {
        let mut bag = Bag::new();
        emit(self.name, &mut bag, Message::AnalogSignal(self.latest))?;
        Ok(bag)
    }
}

impl fmt::Display for AnalogSensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.latest {
            Some(v) => write!(f, "Signal: {v:.4}"),
            None => f.write_str("Signal: failed"),
        }
    }
}
