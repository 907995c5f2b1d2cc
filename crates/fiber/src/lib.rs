//! Nonlinear pulse propagation in optical fiber.
//!
//! The crate integrates the nonlinear Schrödinger equation
//!
//! ```text
//! dA/dz = -(alpha / 2) A + sum_k i beta_k / k! (i d/dt)^k A + i gamma |A|^2 A
//! ```
//!
//! with the symmetric split-step Fourier method: dispersion and loss act in
//! the frequency domain, self-phase modulation acts in the time domain.
//!
//! # Modules
//!
//! - [`grid`]: discretized time and angular-frequency axes
//! - [`field`]: time-domain fields, their spectra, and the transform pair
//! - [`pulse`]: (super-)Gaussian input pulses
//! - [`fiber`]: fiber parameters and the longitudinal step grid
//! - [`propagate`]: the split-step propagator
//! - [`metrics`]: centroid and RMS width of a distribution
//!
//! # Example
//!
//! ```
//! use lightwave_fiber::{FiberParameters, PulseShape, SpectralGrid, metrics, propagate};
//!
//! let grid = SpectralGrid::new(10, 20.0).unwrap();
//! let input = PulseShape::default().field(grid.time()).unwrap();
//!
//! let fiber = FiberParameters {
//!     length: 1.0,
//!     loss: 0.0,
//!     nonlinearity: 0.003,
//!     dispersion: vec![0.2].into(),
//! };
//! let output = propagate::propagate(grid.time(), &input, &fiber, &propagate::Config::default())
//!     .unwrap();
//!
//! let moments = metrics::centroid_and_width(grid.time(), &output.intensity()).unwrap();
//! assert!(moments.centroid.abs() < 1e-6);
//! ```

pub mod fiber;
pub mod field;
pub mod grid;
pub mod metrics;
pub mod propagate;
pub mod pulse;

pub use fiber::{Dispersion, Fiber, FiberParameters, GridPolicy};
pub use field::{Field, Spectrum};
pub use grid::SpectralGrid;
pub use pulse::PulseShape;
