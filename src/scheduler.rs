//! Event-time bookkeeping for the fixed panel network.
//!
//! One slot per component records when the component last transitioned
//! and when it will next act on its own.  The coordinator asks for the
//! earliest pending time, picks the imminent components, and reschedules
//! every component it touched.
//!
//! ```text
//!   slot   last        next
//!   ─────  ──────────  ──────────
//!   0      00:00:01:000  00:00:02:000   digital
//!   1      00:00:01:000  00:00:02:000   analog
//!   2      00:00:01:900  00:00:02:000   touch
//!   3      00:00:01:000  never          switch
//!   4      00:00:01:000  never          arbiter
//! ```

use core::time::Duration;

use log::trace;

use crate::time::TimeAdvance;

// ═══════════════════════════════════════════════════════════════
//  Slots
// ═══════════════════════════════════════════════════════════════

/// Timing of one component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Slot {
    /// Absolute time of the most recent transition.
    pub last: Duration,
    /// Absolute time of the next internal event, `None` when passive.
    pub next: Option<Duration>,
}

// ═══════════════════════════════════════════════════════════════
//  Scheduler
// ═══════════════════════════════════════════════════════════════

/// Slot table for `N` components, indexed by their position in the network.
pub struct Scheduler<const N: usize> {
    slots: [Slot; N],
}

impl<const N: usize> Scheduler<N> {
    /// Schedule every component from t = 0 using its initial time advance.
    pub fn new(initial: [TimeAdvance; N]) -> Self {
        Self {
            slots: initial.map(|ta| Slot {
                last: Duration::ZERO,
                next: ta.deadline_from(Duration::ZERO),
            }),
        }
    }

    pub fn slot(&self, index: usize) -> Slot {
        self.slots[index]
    }

    /// Earliest pending internal event.  `None` once every component is
    /// passive.
    pub fn next_event_time(&self) -> Option<Duration> {
        self.slots.iter().filter_map(|s| s.next).min()
    }

    /// Whether component `index` is scheduled to act at `t`.
    pub fn is_imminent(&self, index: usize, t: Duration) -> bool {
        self.slots[index].next == Some(t)
    }

    /// Indices of every component scheduled at `t`, in network order.
    pub fn imminent(&self, t: Duration) -> impl Iterator<Item = usize> + '_ {
        (0..N).filter(move |&i| self.is_imminent(i, t))
    }

    /// Time since component `index` last transitioned.
    pub fn elapsed(&self, index: usize, t: Duration) -> Duration {
        t.saturating_sub(self.slots[index].last)
    }

    /// Record a transition of component `index` at `t` and its new advance.
    pub fn reschedule(&mut self, index: usize, t: Duration, ta: TimeAdvance) {
        let slot = &mut self.slots[index];
        slot.last = t;
        slot.next = ta.deadline_from(t);
        trace!("slot {index}: last={t:?} next={:?}", slot.next);
    }
}
