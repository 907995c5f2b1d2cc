/// Control actions supported by the cavity driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop the run and return the state reached so far.
    StopEarly,
}
