//! Amplifies a train of pulses in the default regenerative amplifier.
//!
//! Run with `RUST_LOG=trace` to follow every round trip.

use std::error::Error;

use lightwave_regen::{Config, Event, Regen};
use log::info;
use uom::si::{energy::microjoule, time::nanosecond};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let regen = Regen::new(Config::default());
    let config = regen.config();
    info!(
        "round trip {:.3} ns, gate {:.1} ns, {} round trips",
        config.round_trip_time().get::<nanosecond>(),
        config.gate_time().get::<nanosecond>(),
        config.round_trips(),
    );

    let mut build_up = Vec::new();
    let solution = regen.run_observed(|event: &Event| {
        build_up.push(event.state().energy.get::<microjoule>());
        None
    })?;
    info!(
        "first pulse: {:.4} uJ after {} round trips, gain {:.4}",
        solution.state.energy.get::<microjoule>(),
        solution.round_trips,
        solution.state.gain,
    );
    info!("build-up (uJ): {build_up:.4?}");

    for (pulse, state) in regen.pulse_train(10)?.iter().enumerate() {
        info!(
            "pulse {pulse}: {:.4} uJ, gain at dump {:.4}",
            state.energy.get::<microjoule>(),
            state.gain,
        );
    }

    Ok(())
}
