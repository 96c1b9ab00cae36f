//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing coordinator events through the
//! `log` facade, in the message/state layout of the appliance's trace
//! logs.  Transitions go out at `debug` so a normal run only shows
//! lifecycle, renders and halts.

use log::{debug, error, info};

use crate::app::events::PanelEvent;
use crate::app::ports::EventSink;
use crate::time::format_hms;

/// Adapter that logs every [`PanelEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink {
    renders: u64,
}

impl LogEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates rendered so far.
    pub fn renders(&self) -> u64 {
        self.renders
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &PanelEvent) {
        match event {
            PanelEvent::Started { models } => {
                info!("START | models={models}");
            }
            PanelEvent::Transition {
                time,
                model,
                kind,
                state,
            } => {
                debug!("STATE | {} | {model} | {kind:?} | {state}", format_hms(*time));
            }
            PanelEvent::Rendered { time, background } => {
                self.renders += 1;
                info!(
                    "RENDER | {} | background={background:?} (0x{:08X})",
                    format_hms(*time),
                    background.argb()
                );
            }
            PanelEvent::Halted { time, error } => {
                error!("HALT | {} | {error}", format_hms(*time));
            }
        }
    }
}
