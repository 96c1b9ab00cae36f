//! Touch panel source, a conditional generator.
//!
//! Polls the controller every period but only emits when the last poll
//! saw a contact; otherwise its output bag is empty.

use core::fmt;
use core::time::Duration;

use crate::app::ports::TouchDriver;
use crate::error::Result;
use crate::model::{Atomic, Bag, Message, Port, emit};
use crate::readings::TouchEvent;
use crate::time::TimeAdvance;

use super::reject_input;

pub struct TouchSensor {
    name: &'static str,
    driver: Box<dyn TouchDriver>,
    period: Duration,
    contact: Option<TouchEvent>,
}

impl TouchSensor {
    /// The controller is not polled until the first period elapses, so a
    /// finger resting on the panel at power-up is not reported at t = 0.
    pub fn new(name: &'static str, driver: impl TouchDriver + 'static, period: Duration) -> Self {
        Self {
            name,
            driver: Box::new(driver),
            period,
            contact: None,
        }
    }

    pub fn contact(&self) -> Option<TouchEvent> {
        self.contact
    }
}

impl Atomic for TouchSensor {
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
        self.contact = self.driver.poll();
    }

    fn external_transition(&mut self, _elapsed: Duration, _inputs: &Bag) -> Result<()> {
        reject_input(self.name)
    }

    fn output(&self) -> Result<Bag> {
        let mut bag = Bag::new();
        if let Some(point) = self.contact {
            emit(self.name, &mut bag, Message::Touch(point))?;
        }
        Ok(bag)
    }
}

impl fmt::Display for TouchSensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.contact {
            Some(p) => write!(f, "Touched: x={} y={}", p.x, p.y),
            None => f.write_str("Touched: no"),
        }
    }
}
