use super::CavityState;

/// Event emitted by the cavity driver after each phase transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// The low-Q pump recovery finished and the seed was injected.
    Pumped { state: CavityState },

    /// A high-Q round trip finished (numbered from 1).
    RoundTrip { round_trip: usize, state: CavityState },
}

impl Event {
    /// Returns the cavity state carried by this event.
    #[must_use]
    pub fn state(&self) -> CavityState {
        match *self {
            Self::Pumped { state } | Self::RoundTrip { state, .. } => state,
        }
    }
}
