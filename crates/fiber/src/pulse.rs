//! (Super-)Gaussian input pulses.

use lightwave_core::constraint::{
    Constrained, ConstraintError, Finite, NonNegative, StrictlyPositive,
};
use num_complex::Complex64;
use thiserror::Error;

use crate::Field;

/// Errors that can occur when sampling a [`PulseShape`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    #[error("peak power is invalid: {0}")]
    PeakPower(#[source] ConstraintError),

    #[error("width is invalid: {0}")]
    Width(#[source] ConstraintError),

    #[error("chirp is invalid: {0}")]
    Chirp(#[source] ConstraintError),

    #[error("shape order must be at least 1")]
    ZeroOrder,
}

/// A chirped (super-)Gaussian pulse envelope.
///
/// The sampled field is
///
/// ```text
/// A(t) = sqrt(P0) * exp(-(1 + iC) / (2 T0^2) * t^(2m))
/// ```
///
/// with peak power `P0`, width `T0`, chirp `C` and order `m`. An order of 1
/// gives a Gaussian; higher orders give steeper edges.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PulseShape {
    pub peak_power: f64,
    pub width: f64,
    pub chirp: f64,
    pub order: u32,
}

impl Default for PulseShape {
    fn default() -> Self {
        Self {
            peak_power: 6.667,
            width: 1.0,
            chirp: 0.0,
            order: 1,
        }
    }
}

impl PulseShape {
    /// Samples the pulse on a time axis.
    ///
    /// # Errors
    ///
    /// Returns an error if the peak power is negative, the width is not
    /// strictly positive, the chirp is not finite, or the order is zero.
    pub fn field(&self, time: &[f64]) -> Result<Field, Error> {
        let peak_power = Constrained::<f64, NonNegative>::new(self.peak_power)
            .map_err(Error::PeakPower)?
            .into_inner();
        let width = Constrained::<f64, StrictlyPositive>::new(self.width)
            .map_err(Error::Width)?
            .into_inner();
        let chirp = Constrained::<f64, Finite>::new(self.chirp)
            .map_err(Error::Chirp)?
            .into_inner();
        if self.order == 0 {
            return Err(Error::ZeroOrder);
        }

        let amplitude = peak_power.sqrt();
        let exponent = -Complex64::new(1.0, chirp) / (2.0 * width * width);
        let power = i32::try_from(self.order.saturating_mul(2)).unwrap_or(i32::MAX);

        Ok(time
            .iter()
            .map(|t| amplitude * (exponent * t.powi(power)).exp())
            .collect())
    }
}
