//! Core traits and types shared by the Lightwave simulation engines.
//!
//! This crate defines the small set of abstractions that the solvers and the
//! two physics engines (fiber propagation and regenerative amplification)
//! build on:
//!
//! - [`Observer`]: receives engine events and optionally returns control actions
//! - [`StepIntegrable`]: a state that can be advanced by `derivative * delta`
//! - [`constraint`]: numeric invariants checked once at construction

pub mod constraint;

mod observer;
mod step;

pub use observer::Observer;
pub use step::{DerivativeOf, StepIntegrable};
