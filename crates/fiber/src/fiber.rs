//! Fiber parameters and the longitudinal step grid.

use lightwave_core::constraint::{
    Constrained, ConstraintError, Finite, NonNegative, StrictlyPositive,
};
use thiserror::Error;

use lightwave_core::Observer;

use crate::{Field, propagate};

/// Errors that can occur when building a [`Fiber`] or its grid.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum Error {
    #[error("fiber length is invalid: {0}")]
    Length(#[source] ConstraintError),

    #[error("loss coefficient is invalid: {0}")]
    Loss(#[source] ConstraintError),

    #[error("nonlinear coefficient is invalid: {0}")]
    Nonlinearity(#[source] ConstraintError),

    #[error("at least one dispersion coefficient is required")]
    EmptyDispersion,

    #[error("dispersion coefficient at order index {index} is invalid: {source}")]
    Dispersion {
        index: usize,
        #[source]
        source: ConstraintError,
    },

    #[error("grid step is invalid: {0}")]
    GridStep(#[source] ConstraintError),

    #[error("grid step count must be at least 1")]
    ZeroGridCount,

    #[error("grid would need {count} points, more than the maximum of {max}")]
    TooManyGridPoints { count: f64, max: usize },
}

/// Dispersion coefficients indexed by expansion order.
///
/// Index 0 is the second-order (group-velocity) coefficient `beta2`, index 1
/// is `beta3`, and so on. A single scalar converts to a one-term expansion.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Dispersion(Vec<f64>);

impl Dispersion {
    /// Wraps dispersion coefficients starting at second order.
    #[must_use]
    pub fn new(coefficients: Vec<f64>) -> Self {
        Self(coefficients)
    }

    /// Returns the coefficients, starting at second order.
    #[must_use]
    pub fn coefficients(&self) -> &[f64] {
        &self.0
    }
}

impl From<f64> for Dispersion {
    fn from(beta2: f64) -> Self {
        Self(vec![beta2])
    }
}

impl From<Vec<f64>> for Dispersion {
    fn from(coefficients: Vec<f64>) -> Self {
        Self(coefficients)
    }
}

impl<const N: usize> From<[f64; N]> for Dispersion {
    fn from(coefficients: [f64; N]) -> Self {
        Self(coefficients.to_vec())
    }
}

/// Physical parameters of a fiber span.
///
/// Units only need to be consistent with the time axis and field: with time
/// in ps and power in W, `length` is in m, `loss` in 1/m, `nonlinearity` in
/// 1/(W m) and the `k`-th dispersion coefficient in ps^(k+2)/m.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FiberParameters {
    pub length: f64,
    /// Loss coefficient `alpha`; negative values give gain.
    pub loss: f64,
    /// Nonlinear coefficient `gamma`.
    pub nonlinearity: f64,
    pub dispersion: Dispersion,
}

impl Default for FiberParameters {
    fn default() -> Self {
        Self {
            length: 0.0,
            loss: 0.0,
            nonlinearity: 0.0,
            dispersion: Dispersion::new(vec![0.0, 0.0, 0.0]),
        }
    }
}

impl FiberParameters {
    /// Checks every parameter.
    ///
    /// # Errors
    ///
    /// Returns the first invalid parameter found.
    pub fn validate(&self) -> Result<(), Error> {
        Constrained::<f64, NonNegative>::new(self.length).map_err(Error::Length)?;
        Constrained::<f64, Finite>::new(self.loss).map_err(Error::Loss)?;
        Constrained::<f64, Finite>::new(self.nonlinearity).map_err(Error::Nonlinearity)?;

        if self.dispersion.coefficients().is_empty() {
            return Err(Error::EmptyDispersion);
        }
        for (index, beta) in self.dispersion.coefficients().iter().enumerate() {
            Constrained::<f64, Finite>::new(*beta)
                .map_err(|source| Error::Dispersion { index, source })?;
        }

        Ok(())
    }
}

/// How the longitudinal grid is laid out along a fiber.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum GridPolicy {
    /// Fixed spacing; the point count is `floor(length / step)`.
    Absolute { step: f64 },
    /// Fixed point count; the spacing is `length / count`.
    Relative { count: usize },
}

impl GridPolicy {
    /// Default spacing for [`GridPolicy::Absolute`], in meters.
    pub const DEFAULT_STEP: f64 = 0.003;

    /// Default point count for [`GridPolicy::Relative`].
    pub const DEFAULT_COUNT: usize = 300;

    /// Absolute policy with the default spacing.
    #[must_use]
    pub fn absolute() -> Self {
        Self::Absolute {
            step: Self::DEFAULT_STEP,
        }
    }

    /// Relative policy with the default point count.
    #[must_use]
    pub fn relative() -> Self {
        Self::Relative {
            count: Self::DEFAULT_COUNT,
        }
    }

    /// Lays out grid positions `step * [0, count)` for a fiber of `length`.
    ///
    /// # Errors
    ///
    /// Returns an error if the length is negative, the absolute step is not
    /// strictly positive, the relative count is zero, or the grid would have
    /// more than [`propagate::Config::MAX_STEP_COUNT`] points.
    pub fn positions(&self, length: f64) -> Result<Vec<f64>, Error> {
        let length = Constrained::<f64, NonNegative>::new(length)
            .map_err(Error::Length)?
            .into_inner();
        let max = propagate::Config::MAX_STEP_COUNT;

        let (step, count) = match *self {
            Self::Absolute { step } => {
                let step = Constrained::<f64, StrictlyPositive>::new(step)
                    .map_err(Error::GridStep)?
                    .into_inner();
                let count = (length / step).floor();
                #[allow(clippy::cast_precision_loss)]
                let limit = max as f64;
                if !count.is_finite() || count > limit {
                    return Err(Error::TooManyGridPoints { count, max });
                }
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let count = count as usize;
                (step, count)
            }
            Self::Relative { count } => {
                if count == 0 {
                    return Err(Error::ZeroGridCount);
                }
                #[allow(clippy::cast_precision_loss)]
                let points = count as f64;
                if count > max {
                    return Err(Error::TooManyGridPoints { count: points, max });
                }
                (length / points, count)
            }
        };

        Ok((0..count).map(|i| step * i as f64).collect())
    }
}

impl Default for GridPolicy {
    fn default() -> Self {
        Self::absolute()
    }
}

/// A fiber span with its own longitudinal grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Fiber {
    parameters: FiberParameters,
    policy: GridPolicy,
    z: Vec<f64>,
}

impl Fiber {
    /// Creates a fiber and lays out its grid.
    ///
    /// # Errors
    ///
    /// Returns an error if any parameter or the grid policy is invalid.
    pub fn new(parameters: FiberParameters, policy: GridPolicy) -> Result<Self, Error> {
        parameters.validate()?;
        let z = policy.positions(parameters.length)?;

        Ok(Self {
            parameters,
            policy,
            z,
        })
    }

    /// Sets a new length and recomputes the grid from scratch.
    ///
    /// On error the fiber is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the length is negative or the policy is invalid.
    pub fn initialize_grid(&mut self, length: f64, policy: GridPolicy) -> Result<(), Error> {
        let z = policy.positions(length)?;

        self.parameters.length = length;
        self.policy = policy;
        self.z = z;
        Ok(())
    }

    /// Returns the fiber's physical parameters.
    #[must_use]
    pub fn parameters(&self) -> &FiberParameters {
        &self.parameters
    }

    /// Returns the fiber length.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.parameters.length
    }

    /// Returns the grid policy the current grid was built with.
    #[must_use]
    pub fn policy(&self) -> GridPolicy {
        self.policy
    }

    /// Returns the grid positions, starting at zero and excluding `length`.
    #[must_use]
    pub fn z(&self) -> &[f64] {
        &self.z
    }

    /// Returns the propagator config that steps once per grid point.
    ///
    /// `nz = z().len()` and `dz = length / nz`. A positive length whose
    /// absolute grid is empty still takes one step.
    #[must_use]
    pub fn step_config(&self) -> propagate::Config {
        propagate::Config::for_grid(self.z.len())
    }

    /// Propagates a time-domain field through this fiber on its own grid.
    ///
    /// # Errors
    ///
    /// See [`propagate::propagate`].
    pub fn propagate(&self, time: &[f64], input: &Field) -> Result<Field, propagate::Error> {
        propagate::propagate(time, input, &self.parameters, &self.step_config())
    }

    /// Like [`Fiber::propagate`], reporting every grid step to `observer`.
    ///
    /// # Errors
    ///
    /// See [`propagate::propagate`].
    pub fn propagate_observed<Obs>(
        &self,
        time: &[f64],
        input: &Field,
        observer: Obs,
    ) -> Result<propagate::Solution, propagate::Error>
    where
        Obs: Observer<propagate::Event, propagate::Action>,
    {
        propagate::propagate_observed(time, input, &self.parameters, &self.step_config(), observer)
    }
}
