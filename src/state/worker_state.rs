/// Worker state definitions for tracking fetch progress
///
/// Every worker in the pool walks this machine once per claimed target and
/// leaves it only through `Terminated`.
use std::fmt;

/// Represents the current state of a pool worker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkerState {
    /// Between targets
    Idle,

    /// Waiting on the work source guard
    Claiming,

    /// Holds a target, nothing attempted yet
    Claimed,

    /// Checking the target against the service allow-list
    Validating,

    /// Network request in flight
    Fetching,

    /// Turning the fetched page into items
    Extracting,

    /// Handing the outcome to the result callback
    Reporting,

    /// Work source ran dry; the worker exits
    Terminated,
}

impl WorkerState {
    /// Returns true if the worker has exited
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Terminated)
    }

    /// Checks whether moving from `self` to `next` is a legal step
    ///
    /// Failures at validation or fetch time jump straight to `Reporting`;
    /// the only way out of the loop is `Claiming -> Terminated`.
    pub fn can_transition_to(&self, next: WorkerState) -> bool {
        use WorkerState::*;

        matches!(
            (self, next),
            (Idle, Claiming)
                | (Claiming, Claimed)
                | (Claiming, Terminated)
                | (Claimed, Validating)
                | (Validating, Reporting)
                | (Validating, Fetching)
                | (Fetching, Reporting)
                | (Fetching, Extracting)
                | (Extracting, Reporting)
                | (Reporting, Idle)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Claiming => "claiming",
            Self::Claimed => "claimed",
            Self::Validating => "validating",
            Self::Fetching => "fetching",
            Self::Extracting => "extracting",
            Self::Reporting => "reporting",
            Self::Terminated => "terminated",
        }
    }
}

impl fmt::Display for WorkerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
