//! Loading simulation setups from TOML.

use lightwave_fiber::{
    Fiber, FiberParameters, GridPolicy, PulseShape, SpectralGrid, metrics, propagate,
};
use lightwave_regen::{self as regen, Regen, RoundTrip};
use serde::Deserialize;
use uom::si::{energy::joule, length::meter};

#[derive(Debug, Deserialize)]
struct GridSetup {
    bit_resolution: u32,
    half_window: f64,
}

#[derive(Debug, Deserialize)]
struct Scenario {
    grid: GridSetup,
    pulse: PulseShape,
    fiber: FiberParameters,
    fiber_grid: GridPolicy,
    propagation: propagate::Config,
    regen: regen::Config,
}

const SCENARIO: &str = r#"
[grid]
bit_resolution = 9
half_window = 20.0

[pulse]
peak_power = 6.667
width = 1.0

[fiber]
length = 2.0
loss = 0.001
nonlinearity = 0.003
dispersion = [0.2, 0.0]

[fiber_grid]
type = "relative"
count = 120

[propagation]
steps_per_unit_length = 50.0

[regen]
small_signal_gain = 0.4
loss = 0.05
upper_state_lifetime = 300e-6
saturation_energy = 1e-3
seed_energy = 1e-9
repetition_rate = 1000.0
round_trips = 20

[regen.round_trip]
cavity_length = 1.6
"#;

#[test]
fn scenario_loads_and_runs() {
    let scenario: Scenario = toml::from_str(SCENARIO).unwrap();

    assert_eq!(scenario.pulse.order, 1);
    assert_eq!(scenario.fiber.dispersion.coefficients(), &[0.2, 0.0]);
    assert_eq!(scenario.fiber_grid, GridPolicy::Relative { count: 120 });
    assert_eq!(scenario.propagation.steps_per_unit_length(), Some(50.0));
    assert!(matches!(
        scenario.regen.parameters().round_trip,
        RoundTrip::CavityLength(d) if d.get::<meter>() == 1.6
    ));

    let grid = SpectralGrid::new(scenario.grid.bit_resolution, scenario.grid.half_window).unwrap();
    let input = scenario.pulse.field(grid.time()).unwrap();
    let output =
        propagate::propagate(grid.time(), &input, &scenario.fiber, &scenario.propagation).unwrap();
    let moments = metrics::centroid_and_width(grid.time(), &output.intensity()).unwrap();
    assert!(moments.rms_width > 0.5_f64.sqrt());

    let from_toml = Regen::new(scenario.regen).run().unwrap();
    let from_defaults = Regen::new(regen::Config::default()).run().unwrap();
    assert!(
        (from_toml.energy.get::<joule>() / from_defaults.energy.get::<joule>() - 1.0).abs() < 1e-9
    );
}

#[test]
fn invalid_regen_setup_is_rejected_on_load() {
    let text = SCENARIO.replace("round_trips = 20", "round_trips = 100000");

    let err = toml::from_str::<Scenario>(&text).unwrap_err();

    assert!(err.to_string().contains("gate time"), "{err}");
}

#[test]
fn invalid_propagation_config_is_rejected_on_load() {
    let text = SCENARIO.replace("steps_per_unit_length = 50.0", "steps_per_unit_length = 0.0");

    assert!(toml::from_str::<Scenario>(&text).is_err());
}

#[test]
fn propagation_config_accepts_a_fixed_step_count() {
    let text = SCENARIO.replace("steps_per_unit_length = 50.0", "step_count = 120");
    let scenario: Scenario = toml::from_str(&text).unwrap();

    assert_eq!(
        scenario.propagation.resolution(),
        propagate::Resolution::Steps(120)
    );

    // A fiber on a 120-point grid steps exactly like the loaded config.
    let grid = SpectralGrid::new(scenario.grid.bit_resolution, scenario.grid.half_window).unwrap();
    let input = scenario.pulse.field(grid.time()).unwrap();
    let fiber = Fiber::new(scenario.fiber.clone(), scenario.fiber_grid).unwrap();
    assert_eq!(
        fiber.propagate(grid.time(), &input).unwrap(),
        propagate::propagate(grid.time(), &input, &scenario.fiber, &scenario.propagation).unwrap()
    );
}

#[test]
fn propagation_config_needs_exactly_one_resolution() {
    let both = SCENARIO.replace(
        "steps_per_unit_length = 50.0",
        "steps_per_unit_length = 50.0\nstep_count = 120",
    );
    let err = toml::from_str::<Scenario>(&both).unwrap_err();
    assert!(err.to_string().contains("exactly one"), "{err}");

    let neither = SCENARIO.replace("steps_per_unit_length = 50.0", "");
    assert!(toml::from_str::<Scenario>(&neither).is_err());
}

#[test]
fn fiber_parameters_round_trip_through_toml() {
    let fiber = FiberParameters {
        length: 50.0,
        loss: 0.001,
        nonlinearity: 0.003,
        dispersion: [0.2, 0.0].into(),
    };

    let text = toml::to_string(&fiber).unwrap();
    let back: FiberParameters = toml::from_str(&text).unwrap();

    assert_eq!(back, fiber);
}
