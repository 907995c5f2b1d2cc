//! Symmetric split-step Fourier propagation of the nonlinear Schrödinger equation.
//!
//! Each longitudinal step of size `dz` splits the equation into a linear part,
//! applied to the spectrum as a multiplication by `exp(D(w))`,
//!
//! ```text
//! D(w) = -(alpha / 2) dz + sum_k i beta_k w^(k+2) / (k+2)! dz
//! ```
//!
//! and a nonlinear part, applied to the time-domain field as the phase rotation
//! `A -> A exp(i gamma dz |A|^2)`. The nonlinear step is split in half around
//! the linear steps:
//!
//! ```text
//! N/2, (L, N) x (nz - 1), L, N/2
//! ```
//!
//! which makes the scheme second-order accurate in `dz`.
//!
//! # Example
//!
//! ```
//! use lightwave_fiber::{FiberParameters, PulseShape, SpectralGrid, propagate};
//!
//! let grid = SpectralGrid::new(8, 10.0).unwrap();
//! let input = PulseShape::default().field(grid.time()).unwrap();
//! let fiber = FiberParameters {
//!     length: 0.5,
//!     loss: 0.0,
//!     nonlinearity: 0.0,
//!     dispersion: 0.2.into(),
//! };
//!
//! let output = propagate::propagate(grid.time(), &input, &fiber, &propagate::Config::default())
//!     .unwrap();
//! assert_eq!(output.len(), input.len());
//! ```

mod action;
mod config;
mod error;
mod event;
mod solution;

pub use action::Action;
pub use config::{Config, Resolution};
pub use error::{Argument, ConfigError, Error};
pub use event::Event;
pub use solution::{Solution, Status};

use std::ops::ControlFlow;

use lightwave_core::Observer;
use log::{debug, trace, warn};
use num_complex::Complex64;

use crate::{Field, FiberParameters, field::Transform, grid};

/// Relative tolerance on the spacing of the time axis.
const UNIFORM_SPACING_TOLERANCE: f64 = 1e-9;

/// Propagates `input` through a fiber described by `fiber`.
///
/// Returns the time-domain field at the end of the fiber, with the same
/// length as `input`. A zero-length fiber returns the input unchanged.
///
/// Numerical instability from an overly coarse step is not detected; a
/// non-finite output is logged as a warning and returned as is.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] if the time axis is not a finite, strictly
/// increasing, uniformly spaced power-of-two sequence, if any field sample or
/// fiber parameter is not finite, if the length is negative or needs more
/// than [`Config::MAX_STEP_COUNT`] steps, or if there are no dispersion
/// coefficients. Returns [`Error::LengthMismatch`] if the time
/// axis and field differ in length.
pub fn propagate(
    time: &[f64],
    input: &Field,
    fiber: &FiberParameters,
    config: &Config,
) -> Result<Field, Error> {
    let plan = Plan::new(time, input, fiber, config)?;
    let (_, field) = plan.run(input, None::<fn(usize, Field) -> ControlFlow<()>>);
    Ok(field)
}

/// Propagates `input` through `fiber`, reporting every step to `observer`.
///
/// The observer receives an [`Event`] for the input (step 0) and after each
/// longitudinal step, and may return [`Action::StopEarly`] to end the run.
///
/// # Errors
///
/// Same as [`propagate`].
pub fn propagate_observed<Obs>(
    time: &[f64],
    input: &Field,
    fiber: &FiberParameters,
    config: &Config,
    mut observer: Obs,
) -> Result<Solution, Error>
where
    Obs: Observer<Event, Action>,
{
    let plan = Plan::new(time, input, fiber, config)?;

    let start = Event {
        step: 0,
        z: 0.0,
        field: input.clone(),
    };
    if let Some(Action::StopEarly) = observer.observe(&start) {
        return Ok(Solution {
            status: Status::StoppedByObserver,
            field: start.field,
            steps: 0,
            z: 0.0,
        });
    }

    let mut stopped = false;
    let (steps, field) = plan.run(
        input,
        Some(|step: usize, field: Field| {
            let event = Event {
                step,
                z: plan.position(step),
                field,
            };
            match observer.observe(&event) {
                Some(Action::StopEarly) => {
                    stopped = true;
                    ControlFlow::Break(())
                }
                None => ControlFlow::Continue(()),
            }
        }),
    );

    let status = if stopped && steps < plan.steps {
        Status::StoppedByObserver
    } else {
        Status::Complete
    };

    Ok(Solution {
        status,
        field,
        steps,
        z: plan.position(steps),
    })
}

/// Validated inputs and precomputed operators for one propagation.
struct Plan {
    steps: usize,
    dz: f64,
    /// Half-step nonlinear phase per unit intensity, `gamma dz / 2`.
    half_phase: f64,
    /// `exp(D(w))` in FFT ordering.
    linear: Vec<Complex64>,
    transform: Option<Transform>,
}

impl Plan {
    fn new(
        time: &[f64],
        input: &Field,
        fiber: &FiberParameters,
        config: &Config,
    ) -> Result<Self, Error> {
        let dtau = validate(time, input, fiber)?;

        let steps = config.step_count(fiber.length).ok_or_else(|| {
            Error::invalid(Argument::Length, "needs more steps than the propagator allows")
        })?;
        if steps == 0 {
            debug!("zero-length fiber, returning the input field");
            return Ok(Self {
                steps,
                dz: 0.0,
                half_phase: 0.0,
                linear: Vec::new(),
                transform: None,
            });
        }

        let dz = fiber.length / steps as f64;
        let omega = grid::angular_frequencies(time.len(), dtau);
        let linear = linear_operator(&omega, fiber, dz);

        debug!(
            "split-step: {} samples, {steps} steps of dz = {dz:e} over length {}",
            time.len(),
            fiber.length,
        );

        Ok(Self {
            steps,
            dz,
            half_phase: 0.5 * fiber.nonlinearity * dz,
            linear,
            transform: Some(Transform::new(time.len())),
        })
    }

    fn position(&self, step: usize) -> f64 {
        self.dz * step as f64
    }

    /// Runs the split-step loop, handing each completed step to `on_step`.
    ///
    /// The field passed to `on_step` is level with `z = step * dz`. Returns
    /// the number of steps completed and the field reached.
    fn run<F>(&self, input: &Field, mut on_step: Option<F>) -> (usize, Field)
    where
        F: FnMut(usize, Field) -> ControlFlow<()>,
    {
        let Some(transform) = &self.transform else {
            return (0, input.clone());
        };

        let mut field = nonlinear_step(input.samples(), self.half_phase);

        for step in 1..self.steps {
            field = self.linear_step(transform, &field);
            field = nonlinear_step(&field, 2.0 * self.half_phase);
            trace!("split-step {step}/{} at z = {:e}", self.steps, self.position(step));

            if let Some(on_step) = on_step.as_mut() {
                // Interior fields lead by half a nonlinear step.
                let level = Field::new(nonlinear_step(&field, -self.half_phase));
                if on_step(step, level.clone()).is_break() {
                    return (step, level);
                }
            }
        }

        field = self.linear_step(transform, &field);
        let output = Field::new(nonlinear_step(&field, self.half_phase));
        trace!("split-step {0}/{0} at z = {1:e}", self.steps, self.position(self.steps));

        if output.samples().iter().any(|a| !a.is_finite()) {
            warn!("propagated field is not finite; the step size may be unstable");
        }
        if let Some(on_step) = on_step.as_mut() {
            // The run is over either way.
            let _ = on_step(self.steps, output.clone());
        }

        (self.steps, output)
    }

    /// Applies `exp(D(w))` to the spectrum of `field`.
    fn linear_step(&self, transform: &Transform, field: &[Complex64]) -> Vec<Complex64> {
        let spectrum: Vec<Complex64> = transform
            .to_spectrum(field)
            .samples()
            .iter()
            .zip(&self.linear)
            .map(|(a, d)| a * d)
            .collect();
        transform.to_field(&spectrum).into_inner()
    }
}

/// Checks every argument and returns the time step `dtau`.
fn validate(time: &[f64], input: &Field, fiber: &FiberParameters) -> Result<f64, Error> {
    if time.len() < 2 {
        return Err(Error::invalid(Argument::Time, "needs at least two samples"));
    }
    if !time.len().is_power_of_two() {
        return Err(Error::invalid(
            Argument::Time,
            "sample count must be a power of two",
        ));
    }
    if let Some(index) = time.iter().position(|t| !t.is_finite()) {
        return Err(Error::invalid_at(Argument::Time, index, "must be finite"));
    }

    let dtau = time[1] - time[0];
    if dtau <= 0.0 {
        return Err(Error::invalid_at(
            Argument::Time,
            1,
            "must be strictly increasing",
        ));
    }
    for (i, pair) in time.windows(2).enumerate() {
        if ((pair[1] - pair[0]) - dtau).abs() > UNIFORM_SPACING_TOLERANCE * dtau {
            return Err(Error::invalid_at(
                Argument::Time,
                i + 1,
                "must be uniformly spaced",
            ));
        }
    }

    if let Some(index) = input.samples().iter().position(|a| !a.is_finite()) {
        return Err(Error::invalid_at(Argument::Field, index, "must be finite"));
    }

    if !fiber.length.is_finite() {
        return Err(Error::invalid(Argument::Length, "must be finite"));
    }
    if fiber.length < 0.0 {
        return Err(Error::invalid(Argument::Length, "must be non-negative"));
    }
    if !fiber.loss.is_finite() {
        return Err(Error::invalid(Argument::Loss, "must be finite"));
    }
    if !fiber.nonlinearity.is_finite() {
        return Err(Error::invalid(Argument::Nonlinearity, "must be finite"));
    }

    let dispersion = fiber.dispersion.coefficients();
    if dispersion.is_empty() {
        return Err(Error::invalid(
            Argument::Dispersion,
            "needs at least one coefficient",
        ));
    }
    if let Some(index) = dispersion.iter().position(|b| !b.is_finite()) {
        return Err(Error::invalid_at(
            Argument::Dispersion,
            index,
            "must be finite",
        ));
    }

    if time.len() != input.len() {
        return Err(Error::LengthMismatch {
            time: time.len(),
            field: input.len(),
        });
    }

    Ok(dtau)
}

/// Builds `exp(D(w))` for one step of size `dz`.
fn linear_operator(omega: &[f64], fiber: &FiberParameters, dz: f64) -> Vec<Complex64> {
    let attenuation = (-0.5 * fiber.loss * dz).exp();
    let dispersion = fiber.dispersion.coefficients();

    omega
        .iter()
        .map(|&w| {
            let mut factorial = 1.0;
            let mut power = w;
            let mut phase = 0.0;
            for (k, beta) in dispersion.iter().enumerate() {
                let order = k + 2;
                factorial *= order as f64;
                power *= w;
                phase += beta * power / factorial;
            }
            Complex64::from_polar(attenuation, phase * dz)
        })
        .collect()
}

/// Applies `A -> A exp(i phase |A|^2)` to every sample.
fn nonlinear_step(samples: &[Complex64], phase: f64) -> Vec<Complex64> {
    samples
        .iter()
        .map(|a| a * Complex64::cis(phase * a.norm_sqr()))
        .collect()
}
