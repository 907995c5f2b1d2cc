//! Time-domain fields, their spectra, and the transform pair between them.
//!
//! The spectrum of a field is its inverse DFT scaled by `1/N` and the field of
//! a spectrum is its forward DFT, so `field.to_spectrum().to_field()` returns
//! the original samples up to rounding. Every transform produces a new buffer;
//! nothing is transformed in place across calls.

use std::{fmt, sync::Arc};

use num_complex::Complex64;
use rustfft::{Fft, FftPlanner};

/// A complex pulse envelope sampled on a time axis.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Field(Vec<Complex64>);

/// A complex pulse envelope sampled on an angular-frequency axis (FFT ordering).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Spectrum(Vec<Complex64>);

impl Field {
    /// Wraps time-domain samples.
    #[must_use]
    pub fn new(samples: Vec<Complex64>) -> Self {
        Self(samples)
    }

    /// Returns the samples.
    #[must_use]
    pub fn samples(&self) -> &[Complex64] {
        &self.0
    }

    /// Consumes the field and returns its samples.
    #[must_use]
    pub fn into_inner(self) -> Vec<Complex64> {
        self.0
    }

    /// Returns the number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the field has no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `|A|^2` for each sample.
    #[must_use]
    pub fn intensity(&self) -> Vec<f64> {
        self.0.iter().map(Complex64::norm_sqr).collect()
    }

    /// Returns the total energy `sum |A|^2`.
    #[must_use]
    pub fn energy(&self) -> f64 {
        self.0.iter().map(Complex64::norm_sqr).sum()
    }

    /// Returns the spectrum of this field.
    #[must_use]
    pub fn to_spectrum(&self) -> Spectrum {
        if self.is_empty() {
            return Spectrum::default();
        }
        Transform::new(self.len()).to_spectrum(&self.0)
    }
}

impl Spectrum {
    /// Wraps frequency-domain samples in FFT ordering.
    #[must_use]
    pub fn new(samples: Vec<Complex64>) -> Self {
        Self(samples)
    }

    /// Returns the samples.
    #[must_use]
    pub fn samples(&self) -> &[Complex64] {
        &self.0
    }

    /// Consumes the spectrum and returns its samples.
    #[must_use]
    pub fn into_inner(self) -> Vec<Complex64> {
        self.0
    }

    /// Returns the number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the spectrum has no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the power spectral density `|A(w)|^2` in FFT ordering.
    #[must_use]
    pub fn power(&self) -> Vec<f64> {
        self.0.iter().map(Complex64::norm_sqr).collect()
    }

    /// Returns the time-domain field of this spectrum.
    #[must_use]
    pub fn to_field(&self) -> Field {
        if self.is_empty() {
            return Field::default();
        }
        Transform::new(self.len()).to_field(&self.0)
    }
}

impl From<Vec<Complex64>> for Field {
    fn from(samples: Vec<Complex64>) -> Self {
        Self(samples)
    }
}

impl FromIterator<Complex64> for Field {
    fn from_iter<I: IntoIterator<Item = Complex64>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<Vec<Complex64>> for Spectrum {
    fn from(samples: Vec<Complex64>) -> Self {
        Self(samples)
    }
}

impl FromIterator<Complex64> for Spectrum {
    fn from_iter<I: IntoIterator<Item = Complex64>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Reorders FFT-ordered values so the zero-frequency entry sits at the center.
///
/// Useful for presenting a spectrum or frequency axis in ascending order.
#[must_use]
pub fn fftshift<T: Clone>(values: &[T]) -> Vec<T> {
    let split = values.len().div_ceil(2);
    values[split..]
        .iter()
        .chain(&values[..split])
        .cloned()
        .collect()
}

/// Planned forward and inverse DFTs for a fixed length.
///
/// Planning once and reusing the plans keeps the propagation loop cheap.
#[derive(Clone)]
pub(crate) struct Transform {
    len: usize,
    forward: Arc<dyn Fft<f64>>,
    inverse: Arc<dyn Fft<f64>>,
}

impl Transform {
    pub(crate) fn new(len: usize) -> Self {
        let mut planner = FftPlanner::new();
        Self {
            len,
            forward: planner.plan_fft_forward(len),
            inverse: planner.plan_fft_inverse(len),
        }
    }

    /// Time domain to frequency domain: inverse DFT scaled by `1/N`.
    pub(crate) fn to_spectrum(&self, samples: &[Complex64]) -> Spectrum {
        debug_assert_eq!(samples.len(), self.len);
        let mut buffer = samples.to_vec();
        self.inverse.process(&mut buffer);

        let scale = 1.0 / self.len as f64;
        buffer.iter_mut().for_each(|a| *a *= scale);
        Spectrum(buffer)
    }

    /// Frequency domain to time domain: forward DFT.
    pub(crate) fn to_field(&self, samples: &[Complex64]) -> Field {
        debug_assert_eq!(samples.len(), self.len);
        let mut buffer = samples.to_vec();
        self.forward.process(&mut buffer);
        Field(buffer)
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transform").field("len", &self.len).finish()
    }
}
