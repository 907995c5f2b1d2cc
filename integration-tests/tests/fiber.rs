use approx::assert_relative_eq;
use lightwave_core::Observer;
use lightwave_fiber::{
    Fiber, FiberParameters, GridPolicy, PulseShape, SpectralGrid, metrics,
    propagate::{self, Action, Event},
};

fn reference_fiber() -> FiberParameters {
    FiberParameters {
        length: 50.0,
        loss: 0.001,
        nonlinearity: 0.003,
        dispersion: [0.2, 0.0].into(),
    }
}

#[test]
fn gaussian_broadens_symmetrically() {
    let grid = SpectralGrid::new(11, 20.0).unwrap();
    let input = PulseShape::default().field(grid.time()).unwrap();

    let output = propagate::propagate(
        grid.time(),
        &input,
        &reference_fiber(),
        &propagate::Config::default(),
    )
    .unwrap();

    let before = metrics::centroid_and_width(grid.time(), &input.intensity()).unwrap();
    let after = metrics::centroid_and_width(grid.time(), &output.intensity()).unwrap();

    assert_relative_eq!(before.rms_width, 0.5_f64.sqrt(), max_relative = 1e-9);
    assert!(after.centroid.abs() < 0.05, "centroid {}", after.centroid);
    assert!(
        after.rms_width > 5.0 * before.rms_width,
        "width {} -> {}",
        before.rms_width,
        after.rms_width
    );

    // Loss is the only energy sink.
    assert_relative_eq!(
        output.energy(),
        input.energy() * (-0.001_f64 * 50.0).exp(),
        max_relative = 1e-9
    );
}

#[test]
fn fiber_propagates_on_its_own_grid() {
    let grid = SpectralGrid::new(9, 20.0).unwrap();
    let input = PulseShape::default().field(grid.time()).unwrap();
    let params = FiberParameters {
        length: 2.0,
        ..reference_fiber()
    };

    let fiber = Fiber::new(params.clone(), GridPolicy::Relative { count: 7 }).unwrap();
    let bound = fiber.propagate(grid.time(), &input).unwrap();
    let seven_steps = propagate::propagate(
        grid.time(),
        &input,
        &params,
        &propagate::Config::with_step_count(7).unwrap(),
    )
    .unwrap();
    let default_rate =
        propagate::propagate(grid.time(), &input, &params, &propagate::Config::default()).unwrap();

    assert_eq!(bound, seven_steps);
    assert_ne!(bound, default_rate);

    // Refining the grid changes the result only slightly.
    let mut refined = fiber.clone();
    refined
        .initialize_grid(2.0, GridPolicy::Absolute { step: 0.01 })
        .unwrap();
    let fine = refined.propagate(grid.time(), &input).unwrap();
    assert_ne!(fine, bound);
    for (a, b) in fine.samples().iter().zip(bound.samples()) {
        assert!((a - b).norm() < 1e-3, "{a} vs {b}");
    }
}

#[test]
fn observer_records_width_along_the_fiber() {
    struct WidthLog {
        time: Vec<f64>,
        widths: Vec<(f64, f64)>,
    }

    impl Observer<Event, Action> for &mut WidthLog {
        fn observe(&mut self, event: &Event) -> Option<Action> {
            let moments = metrics::centroid_and_width(&self.time, &event.field.intensity()).ok()?;
            self.widths.push((event.z, moments.rms_width));
            None
        }
    }

    let grid = SpectralGrid::new(10, 20.0).unwrap();
    let input = PulseShape::default().field(grid.time()).unwrap();
    let params = FiberParameters {
        length: 5.0,
        ..reference_fiber()
    };

    let mut log = WidthLog {
        time: grid.time().to_vec(),
        widths: Vec::new(),
    };
    let solution = propagate::propagate_observed(
        grid.time(),
        &input,
        &params,
        &propagate::Config::new(10.0).unwrap(),
        &mut log,
    )
    .unwrap();

    assert_eq!(solution.status, propagate::Status::Complete);
    assert_eq!(log.widths.len(), 51);
    assert_relative_eq!(log.widths[50].0, 5.0);
    for pair in log.widths.windows(2) {
        assert!(pair[1].1 > pair[0].1, "width shrank at z = {}", pair[1].0);
    }
}
