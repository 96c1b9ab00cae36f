//! Digital temperature/humidity source (SHT31 class sensor).
//!
//! Samples once at construction so the first emission already carries a
//! real value, then re-polls on every internal transition.

use core::fmt;
use core::time::Duration;

use log::debug;

use crate::app::ports::{ClimateDriver, ClimateSample};
use crate::error::Result;
use crate::model::{Atomic, Bag, Message, Port, emit};
use crate::time::TimeAdvance;

use super::reject_input;

pub struct DigitalSensor {
    name: &'static str,
    driver: Box<dyn ClimateDriver>,
    period: Duration,
    latest: ClimateSample,
}

impl DigitalSensor {
    pub fn new(name: &'static str, driver: impl ClimateDriver + 'static, period: Duration) -> Self {
        let mut driver: Box<dyn ClimateDriver> = Box::new(driver);
        let latest = driver.poll();
        Self {
            name,
            driver,
            period,
            latest,
        }
    }

    /// Sample that the next output will carry.
    pub fn latest(&self) -> ClimateSample {
        self.latest
    }
}

impl Atomic for DigitalSensor {
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
        self.latest = self.driver.poll();
        if self.latest.temperature.is_none() || self.latest.humidity.is_none() {
            debug!("{}: read failed ({:?})", self.name, self.latest);
        }
    }

    fn external_transition(&mut self, _elapsed: Duration, _inputs: &Bag) -> Result<()> {
        reject_input(self.name)
    }

    fn output(&self) -> Result<Bag> {
        let mut bag = Bag::new();
        emit(self.name, &mut bag, Message::DigitalTemperature(self.latest.temperature))?;
        emit(self.name, &mut bag, Message::DigitalHumidity(self.latest.humidity))?;
        Ok(bag)
    }
}

impl fmt::Display for DigitalSensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Temperature: {:?}, Humidity: {:?}",
            self.latest.temperature, self.latest.humidity
        )
    }
}
