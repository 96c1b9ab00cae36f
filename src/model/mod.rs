//! Atomic discrete-event model contract.
//!
//! Every component of the panel is a state machine driven from outside:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Atomic                                                      │
//! │                                                              │
//! │  time_advance()  ── how long until I act on my own           │
//! │  output()        ── what I emit when that time is up (pure)  │
//! │  internal        ── time is up, nothing arrived              │
//! │  external        ── input arrived before time was up         │
//! │  confluence      ── both at once: internal, then external(0) │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The coordinator never sees concrete model types: it drives a fixed
//! array of [`Component`]s, a tagged union of every model kind, through
//! this trait.

pub mod message;

use core::fmt;
use core::time::Duration;

use crate::display::arbiter::Arbiter;
use crate::error::{ModelError, Result};
use crate::sensors::analog::AnalogSensor;
use crate::sensors::digital::DigitalSensor;
use crate::sensors::touch::TouchSensor;
use crate::switch::Switch;
use crate::time::TimeAdvance;

pub use message::{BAG_CAPACITY, Bag, Message, Port};

// ---------------------------------------------------------------------------
// Contract
// ---------------------------------------------------------------------------

/// The interface every component implements.
pub trait Atomic {
    /// Instance name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Ports this model accepts input on.  Empty for pure generators.
    fn input_ports(&self) -> &'static [Port];

    /// Simulated time until the model acts spontaneously.
    fn time_advance(&self) -> TimeAdvance;

    /// The time advance elapsed with no intervening input.
    fn internal_transition(&mut self);

    /// Input arrived `elapsed` after the model's last transition.
    fn external_transition(&mut self, elapsed: Duration, inputs: &Bag) -> Result<()>;

    /// Input arrived in the same instant the time advance elapsed.
    ///
    /// The scheduled internal transition runs first; the input is then
    /// folded into the result with zero elapsed time.
    fn confluence_transition(&mut self, elapsed: Duration, inputs: &Bag) -> Result<()> {
        let _ = elapsed;
        self.internal_transition();
        self.external_transition(Duration::ZERO, inputs)
    }

    /// Messages emitted when the time advance reaches zero.  Pure read.
    fn output(&self) -> Result<Bag>;
}

/// Reject any message on a port the model did not declare.
pub fn check_ports(model: &'static str, declared: &[Port], inputs: &Bag) -> Result<()> {
    match inputs.iter().find(|m| !declared.contains(&m.port())) {
        Some(m) => Err(ModelError::UndeclaredPort {
            model,
            port: m.port(),
        }
        .into()),
        None => Ok(()),
    }
}

/// Push into an output bag, turning overflow into a wiring error.
pub fn emit(model: &'static str, bag: &mut Bag, message: Message) -> Result<()> {
    bag.push(message)
        .map_err(|_| ModelError::BagFull { model }.into())
}

// ---------------------------------------------------------------------------
// Tagged union of model kinds
// ---------------------------------------------------------------------------

/// Every model kind that can sit in the panel network.
pub enum Component {
    Digital(DigitalSensor),
    Analog(AnalogSensor),
    Touch(TouchSensor),
    Switch(Switch),
    Arbiter(Arbiter),
}

impl Component {
    fn inner(&self) -> &dyn Atomic {
        match self {
            Self::Digital(m) => m,
            Self::Analog(m) => m,
            Self::Touch(m) => m,
            Self::Switch(m) => m,
            Self::Arbiter(m) => m,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Atomic {
        match self {
            Self::Digital(m) => m,
            Self::Analog(m) => m,
            Self::Touch(m) => m,
            Self::Switch(m) => m,
            Self::Arbiter(m) => m,
        }
    }
}

impl Atomic for Component {
    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn input_ports(&self) -> &'static [Port] {
        self.inner().input_ports()
    }

    fn time_advance(&self) -> TimeAdvance {
        self.inner().time_advance()
    }

    fn internal_transition(&mut self) {
        self.inner_mut().internal_transition();
    }

    fn external_transition(&mut self, elapsed: Duration, inputs: &Bag) -> Result<()> {
        self.inner_mut().external_transition(elapsed, inputs)
    }

    fn confluence_transition(&mut self, elapsed: Duration, inputs: &Bag) -> Result<()> {
        self.inner_mut().confluence_transition(elapsed, inputs)
    }

    fn output(&self) -> Result<Bag> {
        self.inner().output()
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Digital(m) => fmt::Display::fmt(m, f),
            Self::Analog(m) => fmt::Display::fmt(m, f),
            Self::Touch(m) => fmt::Display::fmt(m, f),
            Self::Switch(m) => fmt::Display::fmt(m, f),
            Self::Arbiter(m) => fmt::Display::fmt(m, f),
        }
    }
}

impl From<DigitalSensor> for Component {
    fn from(m: DigitalSensor) -> Self {
        Self::Digital(m)
    }
}

impl From<AnalogSensor> for Component {
    fn from(m: AnalogSensor) -> Self {
        Self::Analog(m)
    }
}

impl From<TouchSensor> for Component {
    fn from(m: TouchSensor) -> Self {
        Self::Touch(m)
    }
}

impl From<Switch> for Component {
    fn from(m: Switch) -> Self {
        Self::Switch(m)
    }
}

impl From<Arbiter> for Component {
    fn from(m: Arbiter) -> Self {
        Self::Arbiter(m)
    }
}
