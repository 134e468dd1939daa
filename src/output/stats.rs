//! Fetch cycle statistics
//!
//! Counters accumulated by a consumer as outcomes arrive.

use crate::harvest::FetchOutcome;
use std::fmt;

/// Aggregate counts for one fetch cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchStats {
    /// Targets that produced an outcome (success or failure)
    pub completed: usize,

    /// Targets whose outcome carried an error
    pub failed: usize,

    /// Items extracted across all successful targets
    pub items: usize,
}

impl FetchStats {
    /// Counts one outcome
    pub fn record(&mut self, outcome: &FetchOutcome) {
        self.completed += 1;
        match outcome.items() {
            Some(items) => self.items += items.len(),
            None => self.failed += 1,
        }
    }

    pub fn succeeded(&self) -> usize {
        self.completed - self.failed
    }
}

impl fmt::Display for FetchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} targets ({} ok, {} failed), {} items",
            self.completed,
            self.succeeded(),
            self.failed,
            self.items
        )
    }
}
