//! Bank selector: arbitrates between the two temperature sources.
//!
//! The switch keeps the latest record of each bank and forwards the active
//! one to the formatter whenever something worth showing arrives.  A tap on
//! the bottom strip of the panel flips the active bank.
//!
//! ## Touch debounce
//!
//! A tap toggles only if it lands below `touch_min_y` **and** the time
//! since the switch's previous transition (the `elapsed` handed to the
//! external transition) exceeds the debounce window.  No timestamp is
//! compared: a burst of taps inside the window keeps resetting `elapsed`,
//! so only the first one counts.  A bag carrying several taps toggles at
//! most once.

use core::fmt;
use core::time::Duration;

use log::{debug, info};

use crate::config::{PanelConfig, ThermistorConfig};
use crate::error::Result;
use crate::model::{Atomic, Bag, Message, Port, check_ports, emit};
use crate::readings::{Bank, SelectorState, SensorReading};
use crate::sensors::thermistor;
use crate::time::TimeAdvance;

const INPUTS: &[Port] = &[
    Port::DigitalTemperature,
    Port::DigitalHumidity,
    Port::AnalogSignal,
    Port::Touch,
];

pub struct Switch {
    name: &'static str,
    selector: SelectorState,
    banks: [SensorReading; Bank::COUNT],
    propagating: bool,
    /// Sum of every `elapsed` seen so far.
    clock: Duration,

    debounce: Duration,
    touch_min_y: i32,
    rerender_on_toggle: bool,
    thermistor: ThermistorConfig,
}

impl Switch {
    pub fn new(name: &'static str, config: &PanelConfig) -> Self {
        Self {
            name,
            selector: SelectorState::default(),
            // The analog bank has no humidity channel; its field stays None.
            banks: Bank::ALL.map(|b| SensorReading::named(b.label())),
            propagating: false,
            clock: Duration::ZERO,
            debounce: config.debounce_window(),
            touch_min_y: config.touch_min_y,
            rerender_on_toggle: config.rerender_on_toggle,
            thermistor: config.thermistor,
        }
    }

    pub fn selector(&self) -> SelectorState {
        self.selector
    }

    pub fn bank(&self, bank: Bank) -> &SensorReading {
        &self.banks[bank.index()]
    }

    /// Record the next output will carry.
    pub fn active_reading(&self) -> &SensorReading {
        self.bank(self.selector.active)
    }

    pub fn is_propagating(&self) -> bool {
        self.propagating
    }

    fn qualifies(&self, elapsed: Duration, y: i32) -> bool {
        y > self.touch_min_y && elapsed > self.debounce
    }
}

impl Atomic for Switch {
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

    fn external_transition(&mut self, elapsed: Duration, inputs: &Bag) -> Result<()> {
        check_ports(self.name, INPUTS, inputs)?;
        self.clock += elapsed;

        let tapped = inputs.iter().any(|m| match m {
            Message::Touch(p) => self.qualifies(elapsed, p.y),
            _ => false,
        });
        if tapped {
            self.selector.active = self.selector.active.toggled();
            self.selector.last_toggle = self.clock;
            info!("{}: active bank -> {}", self.name, self.selector.active);
            if self.rerender_on_toggle {
                self.propagating = true;
            }
        }

        for m in inputs {
            match m {
                Message::DigitalTemperature(t) => {
                    self.banks[Bank::Digital.index()].temperature = *t;
                    self.propagating = true;
                }
                Message::DigitalHumidity(h) => {
                    self.banks[Bank::Digital.index()].humidity = *h;
                    self.propagating = true;
                }
                Message::AnalogSignal(x) => {
                    let celsius = thermistor::signal_to_celsius(*x, &self.thermistor);
                    if celsius.is_none() {
                        debug!("{}: analog signal {:?} has no temperature", self.name, x);
                    }
                    self.banks[Bank::Analog.index()].temperature = celsius;
                    self.propagating = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn output(&self) -> Result<Bag> {
        let mut bag = Bag::new();
        emit(self.name, &mut bag, Message::Reading(self.active_reading().clone()))?;
        Ok(bag)
    }
}

impl fmt::Display for Switch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sensor Switch Number: {}", self.selector.active.index())
    }
}
