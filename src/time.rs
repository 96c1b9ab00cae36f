//! Simulated time.
//!
//! Absolute time is a [`Duration`] since the start of the run.  Relative
//! waits are expressed as a [`TimeAdvance`], which adds the distinguished
//! "infinite" value used by passive models.
//!
//! Times are written in the appliance's native `HH:MM:SS:mmm` notation in
//! logs and on the command line.

use core::fmt;
use core::time::Duration;

/// How long a model stays in its current state absent external input.
///
/// Ordering is total: every finite advance is smaller than `Infinity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimeAdvance {
    /// Act spontaneously after this much simulated time.
    After(Duration),
    /// Nothing pending; wait for input forever.
    Infinity,
}

impl TimeAdvance {
    /// Act in the current instant.
    pub const ZERO: Self = Self::After(Duration::ZERO);

    /// Absolute time of the next internal event for a model whose last
    /// transition happened at `last`.  `None` means never.
    pub fn deadline_from(self, last: Duration) -> Option<Duration> {
        match self {
            Self::After(d) => last.checked_add(d),
            Self::Infinity => None,
        }
    }
}

impl fmt::Display for TimeAdvance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::After(d) => f.write_str(&format_hms(*d)),
            Self::Infinity => f.write_str("inf"),
        }
    }
}

/// Format a time as `HH:MM:SS:mmm`.  Hours are not wrapped at 24.
pub fn format_hms(t: Duration) -> String {
    let total_ms = t.as_millis();
    let ms = total_ms % 1000;
    let secs = (total_ms / 1000) % 60;
    let mins = (total_ms / 60_000) % 60;
    let hours = total_ms / 3_600_000;
    format!("{hours:02}:{mins:02}:{secs:02}:{ms:03}")
}

/// Parse `HH:MM:SS:mmm`.  Minutes and seconds must be below 60 and the
/// millisecond field below 1000.
pub fn parse_hms(s: &str) -> Option<Duration> {
    let mut fields = s.trim().split(':');
    let hours: u64 = fields.next()?.parse().ok()?;
    let mins: u64 = fields.next()?.parse().ok()?;
    let secs: u64 = fields.next()?.parse().ok()?;
    let ms: u64 = fields.next()?.parse().ok()?;
    if fields.next().is_some() || mins >= 60 || secs >= 60 || ms >= 1000 {
        return None;
    }
    let total = hours
        .checked_mul(3_600_000)?
        .checked_add(mins * 60_000 + secs * 1000 + ms)?;
    Some(Duration::from_millis(total))
}
