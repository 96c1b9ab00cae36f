//! Formatter: turns the selected bank's reading into a panel update.
//!
//! Every reading rebuilds the screen from scratch:
//!
//! ```text
//! row 1  <bank name>
//! row 3  ---Temperature---
//! row 4  23.50 C | UNKNOWN
//! row 6  ----Humidity----
//! row 7  45.00 % | UNKNOWN
//! ```
//!
//! The background follows [`background_for`] on the temperature; text is
//! always white.  The arbiter fires once per reading and then goes
//! passive, so an idle network never re-emits a stale update.

use core::fmt;
use core::time::Duration;

use log::warn;

use crate::error::Result;
use crate::model::{Atomic, Bag, Message, Port, check_ports, emit};
use crate::readings::{Sample, SensorReading};
use crate::time::TimeAdvance;

use super::{Alignment, Color, DisplayLine, DisplayUpdate, background_for};

const INPUTS: &[Port] = &[Port::Reading];

const TEMPERATURE_HEADER: &str = "---Temperature---";
const HUMIDITY_HEADER: &str = "----Humidity----";
const UNKNOWN: &str = "UNKNOWN";

pub struct Arbiter {
    name: &'static str,
    propagating: bool,
    update: DisplayUpdate,
}

impl Arbiter {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            propagating: false,
            update: DisplayUpdate::default(),
        }
    }

    /// The update the next output will carry.
    pub fn update(&self) -> &DisplayUpdate {
        &self.update
    }

    fn render(&mut self, reading: &SensorReading) {
        let lines = [
            DisplayLine::new(1, &reading.name, Alignment::Center),
            DisplayLine::new(3, TEMPERATURE_HEADER, Alignment::Center),
            DisplayLine::new(4, &value_text(reading.temperature, "C"), Alignment::Center),
            DisplayLine::new(6, HUMIDITY_HEADER, Alignment::Center),
            DisplayLine::new(7, &value_text(reading.humidity, "%"), Alignment::Center),
        ];

        self.update.background = background_for(reading.temperature);
        self.update.text_color = Color::White;
        self.update.lines.clear();
        for line in lines {
            if self.update.lines.push(line).is_err() {
                warn!("{}: panel row limit reached, dropping lines", self.name);
                break;
            }
        }
    }
}

fn value_text(value: Sample, unit: &str) -> String {
    match value {
        Some(v) => format!("{v:.2} {unit}"),
        None => UNKNOWN.to_owned(),
    }
}

impl Atomic for Arbiter {
    fn name(&self) -> &'static str {
        self.name
    }

    fn input_ports(&self) -> &'static [Port] {
        INPUTS
    }

    fn time_advance(&self) -> TimeAdvance {
        if self.propagating {
            TimeAdvance::ZERO
        } else {
            TimeAdvance::Infinity
        }
    }

    fn internal_transition(&mut self) {
        self.propagating = false;
    }

    fn external_transition(&mut self, _elapsed: Duration, inputs: &Bag) -> Result<()> {
        check_ports(self.name, INPUTS, inputs)?;
        let latest = inputs.iter().rev().find_map(|m| match m {
            Message::Reading(r) => Some(r),
            _ => None,
        });
        if let Some(reading) = latest {
            self.render(reading);
            self.propagating = true;
        }
        Ok(())
    }

    fn output(&self) -> Result<Bag> {
        let mut bag = Bag::new();
        emit(self.name, &mut bag, Message::Display(self.update.clone()))?;
        Ok(bag)
    }
}

impl fmt::Display for Arbiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Propagating? {}", u8::from(self.propagating))
    }
}
