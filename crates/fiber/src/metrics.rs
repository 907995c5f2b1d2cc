//! Centroid and RMS width of a sampled distribution.
//!
//! Each sample is weighted by the width of its cell, `dx[i] = x[i+1] - x[i]`,
//! with the last cell repeating the previous spacing. The distribution is
//! normalized by its weighted area before the mean and variance are taken.

use thiserror::Error;

/// Which input a [`Error::InvalidInput`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Axis,
    Distribution,
}

/// Errors that can occur when computing [`Moments`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum Error {
    #[error("axis has {axis} samples but the distribution has {distribution}")]
    LengthMismatch { axis: usize, distribution: usize },

    #[error("at least two samples are required, got {len}")]
    TooFewSamples { len: usize },

    #[error("{input:?} value {value} at index {index} is invalid")]
    InvalidInput {
        input: Input,
        index: usize,
        value: f64,
    },

    #[error("distribution has zero area")]
    DegenerateDistribution,
}

/// First and second moments of a distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Moments {
    /// Weighted mean of the axis.
    pub centroid: f64,
    /// Square root of the weighted variance about the centroid.
    pub rms_width: f64,
}

/// Computes the centroid and RMS width of `distribution` over `axis`.
///
/// # Errors
///
/// Returns an error if the inputs differ in length, have fewer than two
/// samples, contain non-finite values or negative weights, or if the
/// distribution has zero area.
pub fn centroid_and_width(axis: &[f64], distribution: &[f64]) -> Result<Moments, Error> {
    if axis.len() != distribution.len() {
        return Err(Error::LengthMismatch {
            axis: axis.len(),
            distribution: distribution.len(),
        });
    }
    if axis.len() < 2 {
        return Err(Error::TooFewSamples { len: axis.len() });
    }
    if let Some((index, &value)) = axis.iter().enumerate().find(|(_, x)| !x.is_finite()) {
        return Err(Error::InvalidInput {
            input: Input::Axis,
            index,
            value,
        });
    }
    if let Some((index, &value)) = distribution
        .iter()
        .enumerate()
        .find(|(_, f)| !f.is_finite() || **f < 0.0)
    {
        return Err(Error::InvalidInput {
            input: Input::Distribution,
            index,
            value,
        });
    }

    let widths = cell_widths(axis);
    let weights: Vec<f64> = widths
        .iter()
        .zip(distribution)
        .map(|(dx, f)| dx * f)
        .collect();

    let area: f64 = weights.iter().sum();
    if area == 0.0 || !area.is_finite() {
        return Err(Error::DegenerateDistribution);
    }

    let centroid = axis.iter().zip(&weights).map(|(x, w)| x * w).sum::<f64>() / area;
    let variance = axis
        .iter()
        .zip(&weights)
        .map(|(x, w)| w * (x - centroid).powi(2))
        .sum::<f64>()
        / area;

    Ok(Moments {
        centroid,
        rms_width: variance.max(0.0).sqrt(),
    })
}

fn cell_widths(axis: &[f64]) -> Vec<f64> {
    let mut widths: Vec<f64> = axis.windows(2).map(|pair| pair[1] - pair[0]).collect();
    if let Some(&last) = widths.last() {
        widths.push(last);
    }
    widths
}
