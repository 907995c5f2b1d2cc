use crate::Field;

/// Indicates how the propagator terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Propagated through the full fiber length.
    Complete,

    /// Stopped early due to an observer action.
    StoppedByObserver,
}

/// The result of an observed propagation.
#[derive(Debug, Clone)]
pub struct Solution {
    /// How the propagator terminated.
    pub status: Status,

    /// Time-domain field at `z`.
    pub field: Field,

    /// Number of longitudinal steps completed.
    pub steps: usize,

    /// Distance reached along the fiber.
    pub z: f64,
}
