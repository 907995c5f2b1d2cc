//! Propagates a Gaussian pulse through 50 m of fiber and reports how it broadens.
//!
//! Run with `RUST_LOG=debug` to see the propagator's setup.

use std::error::Error;

use lightwave_fiber::{
    FiberParameters, PulseShape, SpectralGrid, field::fftshift, metrics, propagate,
};
use log::info;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let grid = SpectralGrid::new(11, 20.0)?;
    let input = PulseShape::default().field(grid.time())?;

    let fiber = FiberParameters {
        length: 50.0,
        loss: 0.001,
        nonlinearity: 0.003,
        dispersion: [0.2, 0.0].into(),
    };
    let output = propagate::propagate(grid.time(), &input, &fiber, &propagate::Config::default())?;

    let before = metrics::centroid_and_width(grid.time(), &input.intensity())?;
    let after = metrics::centroid_and_width(grid.time(), &output.intensity())?;
    info!(
        "time domain: centroid {:.4} -> {:.4}, rms width {:.4} -> {:.4}",
        before.centroid, after.centroid, before.rms_width, after.rms_width,
    );

    let omega = fftshift(grid.angular_frequency());
    let spectrum_in = fftshift(&input.to_spectrum().power());
    let spectrum_out = fftshift(&output.to_spectrum().power());
    let before = metrics::centroid_and_width(&omega, &spectrum_in)?;
    let after = metrics::centroid_and_width(&omega, &spectrum_out)?;
    info!(
        "spectrum: rms width {:.4} -> {:.4}",
        before.rms_width, after.rms_width,
    );

    info!(
        "energy: {:.6} -> {:.6} (loss {:.4})",
        input.energy(),
        output.energy(),
        1.0 - output.energy() / input.energy(),
    );

    Ok(())
}
