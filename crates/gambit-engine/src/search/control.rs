//! Search control: wall-clock deadline checks.

use std::time::{Duration, Instant};

/// Nodes between clock reads inside the tree. Must be a power of two.
const CLOCK_CHECK_INTERVAL: u64 = 2048;

/// Decides when a time-boxed search should stop.
///
/// Checked periodically by the recursion (every 2048 nodes) and before
/// every root move. Without a budget it never stops. Once the deadline has
/// passed the control latches, so later calls answer without the clock.
#[derive(Debug)]
pub struct SearchControl {
    start: Instant,
    budget: Option<Duration>,
    expired: bool,
}

impl SearchControl {
    /// Control for a search bounded only by depth.
    pub fn unlimited() -> Self {
        Self {
            start: Instant::now(),
            budget: None,
            expired: false,
        }
    }

    /// Control with a wall-clock budget; the clock starts immediately.
    pub fn timed(budget: Duration) -> Self {
        Self {
            start: Instant::now(),
            budget: Some(budget),
            expired: false,
        }
    }

    /// Build from an optional budget.
    pub fn from_budget(budget: Option<Duration>) -> Self {
        match budget {
            Some(budget) => Self::timed(budget),
            None => Self::unlimited(),
        }
    }

    /// Check the clock now.
    pub fn time_up(&mut self) -> bool {
        if self.expired {
            return true;
        }
        if let Some(budget) = self.budget
            && self.start.elapsed() >= budget
        {
            self.expired = true;
        }
        self.expired
    }

    /// Cheap in-tree check: reads the clock only every 2048 nodes.
    pub fn should_stop(&mut self, nodes: u64) -> bool {
        if self.expired {
            return true;
        }
        if nodes & (CLOCK_CHECK_INTERVAL - 1) != 0 {
            return false;
        }
        self.time_up()
    }

    /// Whether the deadline has been observed.
    pub fn expired(&self) -> bool {
        self.expired
    }

    pub fn is_timed(&self) -> bool {
        self.budget.is_some()
    }

    /// Time since the search started.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}
