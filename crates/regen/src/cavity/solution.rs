use super::CavityState;

/// Indicates how a cavity run terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Completed every round trip.
    Complete,

    /// Stopped early due to an observer action.
    StoppedByObserver,
}

/// The result of an observed cavity run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solution {
    /// How the run terminated.
    pub status: Status,

    /// Cavity state when the run ended.
    pub state: CavityState,

    /// Number of high-Q round trips completed.
    pub round_trips: usize,
}
