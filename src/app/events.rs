//! Outbound coordinator events.
//!
//! The [`Panel`](super::service::Panel) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them: write to the log, count them in a
//! test, or stream them to a file.

use core::time::Duration;

use crate::display::Color;
use crate::error::Error;

/// Which transition function the coordinator applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionKind {
    /// Time advance elapsed, no input.
    Internal,
    /// Input arrived before the time advance elapsed.
    External,
    /// Both in the same instant.
    Confluence,
}

/// Structured events emitted by the coordinator.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelEvent {
    /// The network is assembled and about to run.
    Started { models: usize },

    /// A component transitioned.  `state` is its one-line state summary
    /// after the transition.
    Transition {
        time: Duration,
        model: &'static str,
        kind: TransitionKind,
        state: String,
    },

    /// A complete update reached the display sink.
    Rendered { time: Duration, background: Color },

    /// A model reported a wiring defect; the run is over.
    Halted { time: Duration, error: Error },
}
