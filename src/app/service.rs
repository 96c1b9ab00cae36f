//! Panel coordinator: drives the fixed model network.
//!
//! [`Panel`] owns the five components and their schedule.  Sinks are
//! injected at call sites, so the whole network runs against mock
//! adapters in tests exactly as it runs against the real panel.
//!
//! ```text
//!  digital_temp_humidity1 ──┐
//!  analog_temp1 ────────────┼──▶ switch1 ──▶ arbiter1 ──▶ DisplaySink
//!  ts1 ─────────────────────┘
//! ```
//!
//! ## One instant
//!
//! 1. Collect `output()` of every component whose time advance elapsed.
//! 2. Route each message by port: sensor and touch ports go to the
//!    switch, readings to the arbiter, display updates to the sink.
//! 3. Deliver: imminent with input → confluence, input only → external
//!    with the time since that component's last transition, imminent
//!    only → internal.  Then reschedule everything that transitioned.
//!
//! No component sees input produced in the same phase it is producing
//! output in, so every bag it receives is already final.

use core::time::Duration;

use log::{debug, error, info};

use crate::config::PanelConfig;
use crate::display::arbiter::Arbiter;
use crate::error::{Error, ModelError, Result};
use crate::model::{Atomic, Bag, Component, Message, Port};
use crate::readings::SelectorState;
use crate::scheduler::Scheduler;
use crate::sensors::analog::AnalogSensor;
use crate::sensors::digital::DigitalSensor;
use crate::sensors::touch::TouchSensor;
use crate::switch::Switch;
use crate::time::format_hms;

use super::events::{PanelEvent, TransitionKind};
use super::ports::{AnalogDriver, ClimateDriver, ClockPort, DisplaySink, EventSink, TouchDriver};

// ───────────────────────────────────────────────────────────────
// Network layout
// ───────────────────────────────────────────────────────────────

/// Slot of each component in the network.
pub const DIGITAL: usize = 0;
pub const ANALOG: usize = 1;
pub const TOUCH: usize = 2;
pub const SWITCH: usize = 3;
pub const ARBITER: usize = 4;

pub const COMPONENTS: usize = 5;

enum Route {
    Model(usize),
    Display,
}

/// Each port has exactly one consumer in the panel network.
fn destination(port: Port) -> Route {
    match port {
        Port::DigitalTemperature | Port::DigitalHumidity | Port::AnalogSignal | Port::Touch => {
            Route::Model(SWITCH)
        }
        Port::Reading => Route::Model(ARBITER),
        Port::Display => Route::Display,
    }
}

// ───────────────────────────────────────────────────────────────
// Panel
// ───────────────────────────────────────────────────────────────

pub struct Panel {
    components: [Component; COMPONENTS],
    scheduler: Scheduler<COMPONENTS>,
    now: Duration,
    deadline_tolerance: Duration,
    halted: Option<Error>,
}

impl Panel {
    /// Assemble the standard network around three drivers.
    pub fn new(
        config: &PanelConfig,
        climate: impl ClimateDriver + 'static,
        analog: impl AnalogDriver + 'static,
        touch: impl TouchDriver + 'static,
    ) -> Result<Self> {
        config.validate()?;
        let panel = Self::from_components([
            DigitalSensor::new("digital_temp_humidity1", climate, config.digital_poll_interval())
                .into(),
            AnalogSensor::new("analog_temp1", analog, config.analog_poll_interval()).into(),
            TouchSensor::new("ts1", touch, config.touch_poll_interval()).into(),
            Switch::new("switch1", config).into(),
            Arbiter::new("arbiter1").into(),
        ]);
        Ok(panel.with_deadline_tolerance(config.missed_deadline_tolerance()))
    }

    /// Assemble a network from prebuilt components placed at the slots
    /// named by [`DIGITAL`], [`ANALOG`], [`TOUCH`], [`SWITCH`] and
    /// [`ARBITER`].  Routing is by port, not by component kind.
    pub fn from_components(components: [Component; COMPONENTS]) -> Self {
        let scheduler = Scheduler::new(components.each_ref().map(|c| c.time_advance()));
        Self {
            components,
            scheduler,
            now: Duration::ZERO,
            deadline_tolerance: PanelConfig::default().missed_deadline_tolerance(),
            halted: None,
        }
    }

    /// Lag behind the wall clock that [`run_realtime`](Self::run_realtime)
    /// accepts before halting.
    pub fn with_deadline_tolerance(mut self, tolerance: Duration) -> Self {
        self.deadline_tolerance = tolerance;
        self
    }

    // ── Lifecycle ─────────────────────────────────────────────

    pub fn start(&mut self, sink: &mut impl EventSink) {
        sink.emit(&PanelEvent::Started {
            models: COMPONENTS,
        });
        info!(
            "Panel started, first event at {}",
            self.scheduler
                .next_event_time()
                .map_or_else(|| "never".to_owned(), format_hms)
        );
    }

    /// Execute the next instant.  Returns its time, or `None` when every
    /// component is passive.
    pub fn step(
        &mut self,
        display: &mut impl DisplaySink,
        sink: &mut impl EventSink,
    ) -> Result<Option<Duration>> {
        if let Some(e) = self.halted {
            return Err(e);
        }
        let Some(t) = self.scheduler.next_event_time() else {
            return Ok(None);
        };
        self.now = t;

        let imminent: [bool; COMPONENTS] =
            core::array::from_fn(|i| self.scheduler.is_imminent(i, t));
        let mut inbox: [Bag; COMPONENTS] = core::array::from_fn(|_| Bag::new());

        // 1 + 2. Outputs of imminent components, routed.
        for i in (0..COMPONENTS).filter(|&i| imminent[i]) {
            let out = match self.components[i].output() {
                Ok(bag) => bag,
                Err(e) => return Err(self.halt(t, e, sink)),
            };
            for message in &out {
                if let Err(e) = self.route(t, message, &mut inbox, display, sink) {
                    return Err(self.halt(t, e, sink));
                }
            }
        }

        // 3. Transitions.
        for i in 0..COMPONENTS {
            let has_input = !inbox[i].is_empty();
            let elapsed = self.scheduler.elapsed(i, t);
            let component = &mut self.components[i];
            let (kind, result) = match (imminent[i], has_input) {
                (true, true) => (
                    TransitionKind::Confluence,
                    component.confluence_transition(elapsed, &inbox[i]),
                ),
                (false, true) => (
                    TransitionKind::External,
                    component.external_transition(elapsed, &inbox[i]),
                ),
                (true, false) => {
                    component.internal_transition();
                    (TransitionKind::Internal, Ok(()))
                }
                (false, false) => continue,
            };
            if let Err(e) = result {
                return Err(self.halt(t, e, sink));
            }

            let component = &self.components[i];
            self.scheduler.reschedule(i, t, component.time_advance());
            let state = component.to_string();
            debug!("{} {} {:?}: {}", format_hms(t), component.name(), kind, state);
            sink.emit(&PanelEvent::Transition {
                time: t,
                model: component.name(),
                kind,
                state,
            });
        }

        Ok(Some(t))
    }

    /// Run every instant up to and including `horizon`, as fast as
    /// possible.  Returns the time of the last executed instant.
    pub fn run_until(
        &mut self,
        horizon: Duration,
        display: &mut impl DisplaySink,
        sink: &mut impl EventSink,
    ) -> Result<Duration> {
        while let Some(t) = self.scheduler.next_event_time() {
            if t > horizon {
                break;
            }
            self.step(display, sink)?;
        }
        Ok(self.now)
    }

    /// Like [`run_until`](Self::run_until), but each instant waits for the
    /// wall clock to reach its simulated time first.  An instant that
    /// starts more than the deadline tolerance late halts the run with
    /// [`Error::MissedDeadline`].
    pub fn run_realtime(
        &mut self,
        horizon: Duration,
        clock: &mut impl ClockPort,
        display: &mut impl DisplaySink,
        sink: &mut impl EventSink,
    ) -> Result<Duration> {
        while let Some(t) = self.scheduler.next_event_time() {
            if t > horizon {
                break;
            }
            if let Some(e) = self.halted {
                return Err(e);
            }
            clock.sleep_until(t);
            let lag = clock.now().saturating_sub(t);
            if lag > self.deadline_tolerance {
                self.now = t;
                return Err(self.halt(t, Error::MissedDeadline { time: t, lag }, sink));
            }
            if !lag.is_zero() {
                debug!("{}: running {lag:?} behind", format_hms(t));
            }
            self.step(display, sink)?;
        }
        Ok(self.now)
    }

    // ── Queries ───────────────────────────────────────────────

    /// Time of the most recently executed instant.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// When the next instant will run, `None` if the network is idle.
    pub fn next_event_time(&self) -> Option<Duration> {
        self.scheduler.next_event_time()
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Bank selection, if a switch sits in the switch slot.
    pub fn selector(&self) -> Option<SelectorState> {
        match &self.components[SWITCH] {
            Component::Switch(s) => Some(s.selector()),
            _ => None,
        }
    }

    /// The error that stopped the run, if any.
    pub fn halted(&self) -> Option<Error> {
        self.halted
    }

    // ── Internal ──────────────────────────────────────────────

    fn route(
        &self,
        t: Duration,
        message: &Message,
        inbox: &mut [Bag; COMPONENTS],
        display: &mut impl DisplaySink,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        match destination(message.port()) {
            Route::Model(dest) => inbox[dest].push(message.clone()).map_err(|_| {
                ModelError::BagFull {
                    model: self.components[dest].name(),
                }
                .into()
            }),
            Route::Display => {
                if let Message::Display(update) = message {
                    display.render(update);
                    sink.emit(&PanelEvent::Rendered {
                        time: t,
                        background: update.background,
                    });
                }
                Ok(())
            }
        }
    }

    fn halt(&mut self, t: Duration, e: Error, sink: &mut impl EventSink) -> Error {
        error!("{}: halted: {e}", format_hms(t));
        self.halted = Some(e);
        sink.emit(&PanelEvent::Halted { time: t, error: e });
        e
    }
}
