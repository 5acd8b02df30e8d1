//! Per-scene elapsed-time gating over the free-running tick counter.

use embassy_time::{Duration, Instant};

/// Tracks when a scene last acted and gates its next action.
///
/// The scheduler delivers a monotonically increasing millisecond counter
/// as an [`Instant`]; each scene compares the elapsed time since its last
/// action against its own configurable thresholds. Rebasing to "now" is
/// how scene switches, resume and stop avoid spurious elapsed-time jumps
/// from stale timestamps.
#[derive(Debug, Clone)]
pub struct SceneClock {
    last: Instant,
}

impl SceneClock {
    pub const fn new() -> Self {
        Self {
            last: Instant::from_millis(0),
        }
    }

    /// Time elapsed since the last rebase.
    pub fn elapsed(&self, now: Instant) -> Duration {
        now.duration_since(self.last)
    }

    /// Re-baseline the clock to the current tick value.
    pub fn rebase(&mut self, now: Instant) {
        self.last = now;
    }

    /// Check whether `period` has elapsed; if so, rebase and report ready.
    pub fn ready(&mut self, now: Instant, period: Duration) -> bool {
        if self.elapsed(now) >= period {
            self.last = now;
            true
        } else {
            false
        }
    }
}

impl Default for SceneClock {
    fn default() -> Self {
        Self::new()
    }
}
