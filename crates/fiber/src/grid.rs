//! Discretized time and angular-frequency axes.
//!
//! A grid holds `N = 2^bits` time samples spanning `[-T, T)` with spacing
//! `dtau = 2T / N`, paired with the angular frequencies of the discrete
//! Fourier transform in standard FFT ordering: non-negative frequencies
//! first, then the negative ones.

use std::f64::consts::PI;

use lightwave_core::constraint::{Constrained, ConstraintError, StrictlyPositive};
use thiserror::Error;

/// Errors that can occur when building a [`SpectralGrid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    #[error("bit resolution must be at least 1")]
    ZeroBitResolution,

    #[error("bit resolution {bits} exceeds the supported maximum of {max}")]
    BitResolutionTooLarge { bits: u32, max: u32 },

    #[error("half window is invalid: {0}")]
    HalfWindow(#[source] ConstraintError),
}

/// Paired time and angular-frequency axes for spectral propagation.
///
/// Both axes have the same power-of-two length and are fixed once built.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralGrid {
    time: Vec<f64>,
    angular_frequency: Vec<f64>,
    step: f64,
}

impl SpectralGrid {
    /// Largest supported bit resolution (`2^24` samples).
    pub const MAX_BIT_RESOLUTION: u32 = 24;

    /// Default bit resolution.
    pub const DEFAULT_BIT_RESOLUTION: u32 = 12;

    /// Default half window, in seconds.
    pub const DEFAULT_HALF_WINDOW: f64 = 20e-12;

    /// Builds a grid of `2^bit_resolution` samples spanning `[-half_window, half_window)`.
    ///
    /// # Errors
    ///
    /// Returns an error if `bit_resolution` is zero or larger than
    /// [`Self::MAX_BIT_RESOLUTION`], or if `half_window` is not strictly positive.
    pub fn new(bit_resolution: u32, half_window: f64) -> Result<Self, Error> {
        if bit_resolution == 0 {
            return Err(Error::ZeroBitResolution);
        }
        if bit_resolution > Self::MAX_BIT_RESOLUTION {
            return Err(Error::BitResolutionTooLarge {
                bits: bit_resolution,
                max: Self::MAX_BIT_RESOLUTION,
            });
        }
        let half_window = Constrained::<f64, StrictlyPositive>::new(half_window)
            .map_err(Error::HalfWindow)?
            .into_inner();

        let n = 1_usize << bit_resolution;
        let step = 2.0 * half_window / n as f64;
        let offset = (n / 2) as f64;

        let time = (0..n).map(|i| step * (i as f64 - offset)).collect();
        let angular_frequency = angular_frequencies(n, step);

        Ok(Self {
            time,
            angular_frequency,
            step,
        })
    }

    /// Returns the time axis.
    #[must_use]
    pub fn time(&self) -> &[f64] {
        &self.time
    }

    /// Returns the angular-frequency axis in FFT ordering.
    #[must_use]
    pub fn angular_frequency(&self) -> &[f64] {
        &self.angular_frequency
    }

    /// Returns the time step `dtau`.
    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Returns the number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Always false: a grid holds at least two samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}

impl Default for SpectralGrid {
    fn default() -> Self {
        // Known-good values, unwrap is safe
        Self::new(Self::DEFAULT_BIT_RESOLUTION, Self::DEFAULT_HALF_WINDOW).unwrap()
    }
}

/// Returns the angular frequencies `2 pi f` of an `n`-point DFT with sample spacing `dtau`.
///
/// Indices `[0, ceil(n/2))` hold `i / (n dtau)` and the rest hold
/// `(i - n) / (n dtau)`, matching the usual FFT output ordering.
#[must_use]
pub fn angular_frequencies(n: usize, dtau: f64) -> Vec<f64> {
    let positive = n.div_ceil(2);
    let scale = 2.0 * PI / (n as f64 * dtau);

    (0..n)
        .map(|i| {
            let k = if i < positive {
                i as f64
            } else {
                i as f64 - n as f64
            };
            scale * k
        })
        .collect()
}
