//! Mock collaborators for integration tests.
//!
//! Scripted drivers replay fixed sequences; the display and event mocks
//! record everything so tests can assert on the full history without a
//! panel attached.

use std::collections::VecDeque;
use std::time::Duration;

use sensorpanel::app::events::{PanelEvent, TransitionKind};
use sensorpanel::app::ports::{
    AnalogDriver, ClimateDriver, ClimateSample, DisplaySink, EventSink, TouchDriver,
};
use sensorpanel::display::DisplayUpdate;
use sensorpanel::readings::{Sample, TouchEvent};

// ── Climate ───────────────────────────────────────────────────

/// Returns queued samples in order, then repeats the last one forever.
pub struct ScriptedClimate {
    queue: VecDeque<ClimateSample>,
    last: ClimateSample,
}

#[allow(dead_code)]
impl ScriptedClimate {
    pub fn steady(sample: ClimateSample) -> Self {
        Self::sequence(vec![sample])
    }

    pub fn sequence(samples: Vec<ClimateSample>) -> Self {
        Self {
            queue: samples.into(),
            last: ClimateSample::FAILED,
        }
    }
}

impl ClimateDriver for ScriptedClimate {
    fn poll(&mut self) -> ClimateSample {
        if let Some(s) = self.queue.pop_front() {
            self.last = s;
        }
        self.last
    }
}

// ── Analog ────────────────────────────────────────────────────

pub struct ScriptedAnalog {
    queue: VecDeque<Sample>,
    last: Sample,
}

#[allow(dead_code)]
impl ScriptedAnalog {
    pub fn steady(signal: Sample) -> Self {
        Self::sequence(vec![signal])
    }

    pub fn sequence(signals: Vec<Sample>) -> Self {
        Self {
            queue: signals.into(),
            last: None,
        }
    }
}

impl AnalogDriver for ScriptedAnalog {
    fn sample(&mut self) -> Sample {
        if let Some(s) = self.queue.pop_front() {
            self.last = s;
        }
        self.last
    }
}

// ── Touch ─────────────────────────────────────────────────────

/// Reports contact on the listed polls (1-based) and nothing otherwise.
///
/// Poll `n` happens at `n * period`; its contact reaches the switch one
/// period later, when the touch source next emits.
pub struct ScriptedTouch {
    polls: u64,
    contacts: Vec<(u64, TouchEvent)>,
}

#[allow(dead_code)]
impl ScriptedTouch {
    pub fn idle() -> Self {
        Self::taps(Vec::new())
    }

    pub fn taps(contacts: Vec<(u64, TouchEvent)>) -> Self {
        Self { polls: 0, contacts }
    }
}

impl TouchDriver for ScriptedTouch {
    fn poll(&mut self) -> Option<TouchEvent> {
        self.polls += 1;
        self.contacts
            .iter()
            .find(|(n, _)| *n == self.polls)
            .map(|(_, p)| *p)
    }
}

// ── Display ───────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingDisplay {
    pub updates: Vec<DisplayUpdate>,
}

#[allow(dead_code)]
impl RecordingDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&DisplayUpdate> {
        self.updates.last()
    }

    pub fn last_texts(&self) -> Vec<String> {
        self.last()
            .map(|u| u.texts().map(str::to_owned).collect())
            .unwrap_or_default()
    }
}

impl DisplaySink for RecordingDisplay {
    fn render(&mut self, update: &DisplayUpdate) {
        self.updates.push(update.clone());
    }
}

// ── Events ────────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingEvents {
    pub events: Vec<PanelEvent>,
}

#[allow(dead_code)]
impl RecordingEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Times at which an update reached the display.
    pub fn render_times(&self) -> Vec<Duration> {
        self.events
            .iter()
            .filter_map(|e| match e {
                PanelEvent::Rendered { time, .. } => Some(*time),
                _ => None,
            })
            .collect()
    }

    /// Transitions of one model, in order.
    pub fn transitions_of(&self, model: &str) -> Vec<(Duration, TransitionKind)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                PanelEvent::Transition {
                    time,
                    model: m,
                    kind,
                    ..
                } if *m == model => Some((*time, *kind)),
                _ => None,
            })
            .collect()
    }
}

impl EventSink for RecordingEvents {
    fn emit(&mut self, event: &PanelEvent) {
        self.events.push(event.clone());
    }
}
