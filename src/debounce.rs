//! Trailing-edge debounce for container resizes.

use std::time::{Duration, Instant};

/// Quiet window after the last resize before the layout is recomputed.
pub const RESIZE_QUIET: Duration = Duration::from_millis(120);

/// Fires once, `quiet` after the most recent trigger.
#[derive(Debug, Clone)]
pub struct Debouncer {
    quiet: Duration,
    pending: Option<Instant>,
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    /// Records an event at `now`, pushing back any pending deadline.
    pub fn trigger(&mut self, now: Instant) {
        self.pending = Some(now + self.quiet);
    }

    /// Time left until the pending deadline, if any.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.pending
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Returns `true` exactly once when the quiet window has elapsed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.pending {
            Some(deadline) if now >= deadline => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(RESIZE_QUIET)
    }
}
