//! Gain and pulse-energy dynamics of a regenerative amplifier.
//!
//! Each pulse goes through two phases:
//!
//! - **Low Q**: the cavity is open while the pump restores the gain toward
//!   its small-signal value `g0`,
//!   `g -> g0 - (g0 - g) exp(-(Td - Tg) / tau)`.
//! - **High Q**: the cavity is closed and the pulse makes `N` round trips,
//!   each integrating
//!   `dE/dt = E (g - l) / Tr` and then
//!   `dg/dt = (g0 - g) / tau - g E / (Esat Tr)`
//!   over one round-trip time with a single RK4 step.
//!
//! `Td = 1 / frep` is the dump period and `Tg = N Tr` the gate time.
//!
//! # Example
//!
//! ```
//! use lightwave_regen::{Config, Regen};
//!
//! let regen = Regen::new(Config::default());
//! let dumped = regen.run().unwrap();
//!
//! assert!(dumped.gain > 0.0);
//! assert!(dumped.energy > regen.config().seed_energy());
//! ```

mod cavity;
mod config;
pub mod spectroscopy;

pub use cavity::{Action, CavityState, Error, Event, Phase, Regen, Solution, Status};
pub use config::{Config, ConfigError, Parameters, RoundTrip};
pub use spectroscopy::saturation_energy;
