//! Typed ports, messages and message bags.
//!
//! Every [`Message`] variant belongs to exactly one [`Port`], so the port
//! type is carried by the payload itself.  A [`Bag`] holds everything that
//! crosses a model boundary in one step: zero, one or several messages,
//! possibly from several producers.

use serde::Serialize;

use crate::display::DisplayUpdate;
use crate::readings::{Sample, SensorReading, TouchEvent};

/// Maximum messages in one bag.  The busiest input is the switch, which
/// sees at most four producers per instant.
pub const BAG_CAPACITY: usize = 8;

/// The closed set of ports in the panel network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Port {
    /// Digital sensor temperature (°C).
    DigitalTemperature,
    /// Digital sensor relative humidity (%).
    DigitalHumidity,
    /// Analog thermistor divider signal, normalised to 0.0–1.0.
    AnalogSignal,
    /// Touch coordinates.
    Touch,
    /// Selected bank record (switch → arbiter).
    Reading,
    /// Renderable panel update (arbiter → display).
    Display,
}

/// A value on a port.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Message {
    DigitalTemperature(Sample),
    DigitalHumidity(Sample),
    AnalogSignal(Sample),
    Touch(TouchEvent),
    Reading(SensorReading),
    Display(DisplayUpdate),
}

impl Message {
    pub fn port(&self) -> Port {
        match self {
            Self::DigitalTemperature(_) => Port::DigitalTemperature,
            Self::DigitalHumidity(_) => Port::DigitalHumidity,
            Self::AnalogSignal(_) => Port::AnalogSignal,
            Self::Touch(_) => Port::Touch,
            Self::Reading(_) => Port::Reading,
            Self::Display(_) => Port::Display,
        }
    }
}

/// Ordered, bounded collection of messages delivered in one step.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Bag {
    messages: heapless::Vec<Message, BAG_CAPACITY>,
}

impl Bag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message.  Hands the message back if the bag is full.
    pub fn push(&mut self, message: Message) -> Result<(), Message> {
        self.messages.push(message)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Message> {
        self.messages.iter()
    }

    /// Messages on one port, in arrival order.
    pub fn on(&self, port: Port) -> impl Iterator<Item = &Message> + '_ {
        self.messages.iter().filter(move |m| m.port() == port)
    }
}

impl<'a> IntoIterator for &'a Bag {
    type Item = &'a Message;
    type IntoIter = core::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

impl FromIterator<Message> for Bag {
    /// Collects up to [`BAG_CAPACITY`] messages; the rest are dropped.
    /// Models build their outputs with [`Bag::push`] instead, which
    /// reports overflow.
    fn from_iter<I: IntoIterator<Item = Message>>(iter: I) -> Self {
        let mut bag = Self::new();
        for m in iter {
            if bag.push(m).is_err() {
                break;
            }
        }
        bag
    }
}
