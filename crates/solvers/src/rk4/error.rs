use thiserror::Error;

/// Errors that can occur during RK4 integration.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum Error {
    #[error("axis value at index {index} is not finite: {value}")]
    InvalidAxis { index: usize, value: f64 },
}
