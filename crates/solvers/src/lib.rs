//! Fixed-step numerical integrators for the Lightwave simulations.
//!
//! # Modules
//!
//! - [`rk4`]: classical fourth-order Runge-Kutta over an explicit axis

pub mod rk4;
