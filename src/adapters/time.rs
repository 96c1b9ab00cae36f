//! Wall-clock adapter.
//!
//! Paces a real-time run with `std::time::Instant`.  Simulated time zero
//! is the moment the clock was created.

use core::time::Duration;
use std::time::Instant;

use crate::app::ports::ClockPort;

pub struct WallClock {
    start: Instant,
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl WallClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl ClockPort for WallClock {
    fn now(&self) -> Duration {
        self.start.elapsed()
    }

    fn sleep_until(&mut self, deadline: Duration) {
        let remaining = deadline.saturating_sub(self.now());
        if !remaining.is_zero() {
            std::thread::sleep(remaining);
        }
    }
}
