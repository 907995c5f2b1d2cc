//! Classical fourth-order Runge-Kutta integration over an explicit axis.
//!
//! The integrator advances `y' = f(x, y)` across a caller-supplied sequence of
//! `x` values. The step for each interval is the local difference between
//! consecutive axis points, so non-uniform axes are supported:
//!
//! ```text
//! dx = x[i+1] - x[i]
//! k1 = f(x[i],          y[i])
//! k2 = f(x[i] + dx / 2, y[i] + k1 * dx / 2)
//! k3 = f(x[i] + dx / 2, y[i] + k2 * dx / 2)
//! k4 = f(x[i] + dx,     y[i] + k3 * dx)
//! y[i+1] = y[i] + dx * (k1 + 2 k2 + 2 k3 + k4) / 6
//! ```
//!
//! There is no step-size control. Parameters the derivative depends on (the
//! gain while integrating energy, say) are captured by the derivative closure.
//!
//! # Example
//!
//! ```
//! use lightwave_solvers::rk4;
//!
//! let rate = -2.0;
//! let y = rk4::integrate(|_x, y: &f64| rate * y, &[0.0, 0.1], 1.0, &rk4::Config::default())
//!     .unwrap();
//!
//! assert_eq!(y.len(), 2);
//! assert!((y[1] - (-0.2_f64).exp()).abs() < 1e-5);
//! ```

mod config;
mod error;

pub use config::Config;
pub use error::Error;

use std::ops::{Add, Mul};

use lightwave_core::{DerivativeOf, StepIntegrable};

/// Advances `y` by one classical RK4 step of size `dx` starting at `x`.
pub fn step<S, F>(derivative: &mut F, x: f64, y: &S, dx: f64) -> S
where
    S: StepIntegrable<f64>,
    DerivativeOf<S, f64>:
        Clone + Add<Output = DerivativeOf<S, f64>> + Mul<f64, Output = DerivativeOf<S, f64>>,
    F: FnMut(f64, &S) -> DerivativeOf<S, f64>,
{
    let half = 0.5 * dx;

    let k1 = derivative(x, y);
    let k2 = derivative(x + half, &y.step(k1.clone(), half));
    let k3 = derivative(x + half, &y.step(k2.clone(), half));
    let k4 = derivative(x + dx, &y.step(k3.clone(), dx));

    let slope = (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (1.0 / 6.0);
    y.step(slope, dx)
}

/// Integrates `y' = derivative(x, y)` across `axis`, starting from `y0`.
///
/// Returns one state per axis point, with `y[0] == y0`. An empty axis yields
/// an empty trajectory and a single-point axis yields `[y0]`.
///
/// # Errors
///
/// Returns [`Error::InvalidAxis`] if any axis value is NaN or infinite.
/// Validation happens before any derivative is evaluated.
pub fn integrate<S, F>(
    mut derivative: F,
    axis: &[f64],
    y0: S,
    config: &Config,
) -> Result<Vec<S>, Error>
where
    S: StepIntegrable<f64>,
    DerivativeOf<S, f64>:
        Clone + Add<Output = DerivativeOf<S, f64>> + Mul<f64, Output = DerivativeOf<S, f64>>,
    F: FnMut(f64, &S) -> DerivativeOf<S, f64>,
{
    if let Some((index, &value)) = axis.iter().enumerate().find(|(_, x)| !x.is_finite()) {
        return Err(Error::InvalidAxis { index, value });
    }

    if axis.is_empty() {
        return Ok(Vec::new());
    }

    let mut trajectory = Vec::with_capacity(axis.len());
    trajectory.push(y0);

    for (i, pair) in axis.windows(2).enumerate() {
        let (x, next_x) = (pair[0], pair[1]);
        let dx = if config.abs_step {
            (next_x - x).abs()
        } else {
            next_x - x
        };

        let next = step(&mut derivative, x, &trajectory[i], dx);
        trajectory.push(next);
    }

    Ok(trajectory)
}
