use std::fmt;

use thiserror::Error;

/// Arguments of [`propagate`](super::propagate), in call order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Argument {
    Time,
    Field,
    Length,
    Loss,
    Nonlinearity,
    Dispersion,
}

impl Argument {
    /// Returns the 1-based position of this argument in the physical signature
    /// `(time, field, length, loss, nonlinearity, dispersion)`.
    #[must_use]
    pub fn position(self) -> usize {
        match self {
            Self::Time => 1,
            Self::Field => 2,
            Self::Length => 3,
            Self::Loss => 4,
            Self::Nonlinearity => 5,
            Self::Dispersion => 6,
        }
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Time => "time axis",
            Self::Field => "input field",
            Self::Length => "fiber length",
            Self::Loss => "loss coefficient",
            Self::Nonlinearity => "nonlinear coefficient",
            Self::Dispersion => "dispersion coefficients",
        };
        f.write_str(name)
    }
}

/// Errors that can occur before propagation starts.
///
/// All inputs are checked up front; no numerical work happens on error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid {argument} (argument {}){}: {reason}", argument.position(), ElementIndex(*index))]
    InvalidInput {
        argument: Argument,
        /// Offending element within the argument, if it is a sequence.
        index: Option<usize>,
        reason: &'static str,
    },

    #[error("time axis has {time} samples but the field has {field}")]
    LengthMismatch { time: usize, field: usize },
}

impl Error {
    pub(crate) fn invalid(argument: Argument, reason: &'static str) -> Self {
        Self::InvalidInput {
            argument,
            index: None,
            reason,
        }
    }

    pub(crate) fn invalid_at(argument: Argument, index: usize, reason: &'static str) -> Self {
        Self::InvalidInput {
            argument,
            index: Some(index),
            reason,
        }
    }
}

struct ElementIndex(Option<usize>);

impl fmt::Display for ElementIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(index) => write!(f, " at index {index}"),
            None => Ok(()),
        }
    }
}

/// Errors that can occur when validating a propagator config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("steps_per_unit_length must be finite and strictly positive")]
    StepsPerUnitLength,

    #[error("step count {count} must be between 1 and {}", super::Config::MAX_STEP_COUNT)]
    StepCount { count: usize },

    #[error("exactly one of steps_per_unit_length and step_count must be set")]
    AmbiguousResolution,
}
