/// Control actions supported by the split-step propagator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop propagating and return the field reached so far.
    StopEarly,
}
