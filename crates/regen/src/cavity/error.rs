use lightwave_solvers::rk4;

/// Errors that can occur while driving the cavity.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("round-trip integration failed: {0}")]
    Integration(#[from] rk4::Error),
}
