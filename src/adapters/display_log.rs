//! Display sink that records updates instead of drawing them.
//!
//! Every update becomes one JSON object on its own line.  Write failures
//! are logged and counted; they never reach the coordinator.

use std::io::Write;

use log::warn;

use crate::app::ports::DisplaySink;
use crate::display::DisplayUpdate;

pub struct DisplayLog<W: Write> {
    out: W,
    written: u64,
    failed: u64,
}

impl<W: Write> DisplayLog<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            written: 0,
            failed: 0,
        }
    }

    /// Updates successfully written.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Updates lost to write errors.
    pub fn failed(&self) -> u64 {
        self.failed
    }

    /// Flush and hand back the writer.
    pub fn into_inner(mut self) -> W {
        if let Err(e) = self.out.flush() {
            warn!("display log: flush failed: {e}");
        }
        self.out
    }

    fn write_update(&mut self, update: &DisplayUpdate) -> std::io::Result<()> {
        serde_json::to_writer(&mut self.out, update)?;
        self.out.write_all(b"\n")
    }
}

impl<W: Write> DisplaySink for DisplayLog<W> {
    fn render(&mut self, update: &DisplayUpdate) {
        match self.write_update(update) {
            Ok(()) => self.written += 1,
            Err(e) => {
                self.failed += 1;
                warn!("display log: update dropped: {e}");
            }
        }
    }
}
