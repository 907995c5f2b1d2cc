//! The cavity state machine and its round-trip driver.

mod action;
mod error;
mod event;
mod solution;

pub use action::Action;
pub use error::Error;
pub use event::Event;
pub use solution::{Solution, Status};

use lightwave_core::Observer;
use lightwave_solvers::rk4;
use log::{debug, trace, warn};
use uom::si::{energy::joule, f64::Energy, time::second};

use crate::Config;

/// Gain and pulse energy inside the cavity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CavityState {
    pub gain: f64,
    pub energy: Energy,
}

impl CavityState {
    fn is_finite(&self) -> bool {
        self.gain.is_finite() && self.energy.get::<joule>().is_finite()
    }
}

/// Where a pulse is in its amplification cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Cavity open, pump restoring the gain.
    LowQ,
    /// Cavity closed after `completed` round trips.
    HighQ { completed: usize },
    /// All round trips done and the pulse dumped.
    Dumped,
}

/// A regenerative amplifier driven by a validated [`Config`].
#[derive(Debug, Clone, PartialEq)]
pub struct Regen {
    config: Config,
}

impl Regen {
    #[must_use]
    pub fn new(config: Config) -> Self {
        debug!(
            "regen: g0 = {}, l = {}, Tr = {:e} s, Td - Tg = {:e} s, {} round trips",
            config.small_signal_gain(),
            config.loss(),
            config.round_trip_time().get::<second>(),
            config.recovery_time().get::<second>(),
            config.round_trips(),
        );
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the state before the first pulse: no gain, seed energy.
    #[must_use]
    pub fn initial_state(&self) -> CavityState {
        CavityState {
            gain: 0.0,
            energy: self.config.seed_energy(),
        }
    }

    /// Low-Q pump recovery over `Td - Tg`, followed by seed injection.
    ///
    /// The gain relaxes toward `g0` in closed form; the energy is replaced by
    /// the seed energy.
    #[must_use]
    pub fn low_q(&self, state: CavityState) -> CavityState {
        let g0 = self.config.small_signal_gain();
        let ratio = self.config.recovery_time().get::<second>()
            / self.config.upper_state_lifetime().get::<second>();

        CavityState {
            gain: g0 - (g0 - state.gain) * (-ratio).exp(),
            energy: self.config.seed_energy(),
        }
    }

    /// One high-Q round trip.
    ///
    /// The energy is integrated first using the current gain, then the gain
    /// is integrated using the updated energy. Each uses a single RK4 step
    /// across `[0, Tr]`.
    ///
    /// # Errors
    ///
    /// Returns an error if the integrator rejects the round-trip axis.
    pub fn round_trip(&self, state: CavityState) -> Result<CavityState, Error> {
        let tr = self.config.round_trip_time().get::<second>();
        let tau = self.config.upper_state_lifetime().get::<second>();
        let esat = self.config.saturation_energy().get::<joule>();
        let g0 = self.config.small_signal_gain();
        let loss = self.config.loss();

        let axis = [0.0, tr];
        let rk4_config = rk4::Config::default();

        let gain = state.gain;
        let energy = state.energy.get::<joule>();
        let energy = last_or(
            rk4::integrate(|_t, e: &f64| e * (gain - loss) / tr, &axis, energy, &rk4_config)?,
            energy,
        );
        let gain = last_or(
            rk4::integrate(
                |_t, g: &f64| (g0 - g) / tau - g * energy / (esat * tr),
                &axis,
                gain,
                &rk4_config,
            )?,
            gain,
        );

        Ok(CavityState {
            gain,
            energy: Energy::new::<joule>(energy),
        })
    }

    /// Advances the state machine by one transition.
    ///
    /// `LowQ` pumps and moves to `HighQ { completed: 0 }`, each `HighQ`
    /// transition performs one round trip, and the `N`-th round trip dumps
    /// the pulse. `Dumped` is terminal and leaves the state unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if a round trip fails.
    pub fn step(&self, phase: Phase, state: CavityState) -> Result<(Phase, CavityState), Error> {
        let round_trips = self.config.round_trips();

        let next = match phase {
            Phase::LowQ => {
                let state = self.low_q(state);
                let phase = if round_trips == 0 {
                    Phase::Dumped
                } else {
                    Phase::HighQ { completed: 0 }
                };
                (phase, state)
            }
            Phase::HighQ { completed } if completed < round_trips => {
                let state = self.round_trip(state)?;
                let completed = completed + 1;
                let phase = if completed == round_trips {
                    Phase::Dumped
                } else {
                    Phase::HighQ { completed }
                };
                (phase, state)
            }
            Phase::HighQ { .. } | Phase::Dumped => (Phase::Dumped, state),
        };

        Ok(next)
    }

    /// Runs one pulse from [`Self::initial_state`] and returns the state at dump.
    ///
    /// # Errors
    ///
    /// Returns an error if a round trip fails.
    pub fn run(&self) -> Result<CavityState, Error> {
        self.run_observed(()).map(|solution| solution.state)
    }

    /// Runs one pulse from [`Self::initial_state`], reporting to `observer`.
    ///
    /// The observer receives [`Event::Pumped`] after the low-Q phase and
    /// [`Event::RoundTrip`] after each round trip, and may return
    /// [`Action::StopEarly`] to end the run.
    ///
    /// # Errors
    ///
    /// Returns an error if a round trip fails.
    pub fn run_observed<Obs>(&self, observer: Obs) -> Result<Solution, Error>
    where
        Obs: Observer<Event, Action>,
    {
        self.cycle(self.initial_state(), observer)
    }

    /// Amplifies `pulses` successive pulses and returns each state at dump.
    ///
    /// The gain left at each dump carries into the next pulse's recovery; the
    /// energy is reseeded for every pulse.
    ///
    /// # Errors
    ///
    /// Returns an error if a round trip fails.
    pub fn pulse_train(&self, pulses: usize) -> Result<Vec<CavityState>, Error> {
        let mut dumped = Vec::with_capacity(pulses);
        let mut state = self.initial_state();

        for pulse in 0..pulses {
            state = self.cycle(state, ())?.state;
            trace!(
                "pulse {pulse}: E = {:e} J, g = {}",
                state.energy.get::<joule>(),
                state.gain,
            );
            dumped.push(state);
        }

        Ok(dumped)
    }

    fn cycle<Obs>(&self, start: CavityState, mut observer: Obs) -> Result<Solution, Error>
    where
        Obs: Observer<Event, Action>,
    {
        let mut phase = Phase::LowQ;
        let mut state = start;
        let mut round_trips = 0;

        while phase != Phase::Dumped {
            let (next, next_state) = self.step(phase, state)?;
            let event = match phase {
                Phase::LowQ => Event::Pumped { state: next_state },
                _ => {
                    round_trips += 1;
                    trace!(
                        "round trip {round_trips}: E = {:e} J, g = {}",
                        next_state.energy.get::<joule>(),
                        next_state.gain,
                    );
                    Event::RoundTrip {
                        round_trip: round_trips,
                        state: next_state,
                    }
                }
            };
            phase = next;
            state = next_state;

            if !state.is_finite() {
                warn!("cavity state is not finite after {round_trips} round trips");
            }

            if let Some(Action::StopEarly) = observer.observe(&event) {
                let status = if phase == Phase::Dumped {
                    Status::Complete
                } else {
                    Status::StoppedByObserver
                };
                return Ok(Solution {
                    status,
                    state,
                    round_trips,
                });
            }
        }

        Ok(Solution {
            status: Status::Complete,
            state,
            round_trips,
        })
    }
}

fn last_or(trajectory: Vec<f64>, fallback: f64) -> f64 {
    trajectory.last().copied().unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        energy::{microjoule, nanojoule},
        f64::Time,
        time::nanosecond,
    };

    use crate::{Parameters, RoundTrip};

    /// RK4 amplification factor of one step for `y' = (z / h) y`.
    fn rk4_factor(z: f64) -> f64 {
        1.0 + z + z * z / 2.0 + z.powi(3) / 6.0 + z.powi(4) / 24.0
    }

    #[test]
    fn low_q_recovers_gain_in_closed_form() {
        let regen = Regen::new(Config::default());
        let config = regen.config();

        let pumped = regen.low_q(regen.initial_state());

        let ratio = config.recovery_time().get::<second>() / 300e-6;
        assert_relative_eq!(pumped.gain, 0.4 * (1.0 - (-ratio).exp()), max_relative = 1e-12);
        assert_eq!(pumped.energy, config.seed_energy());
    }

    #[test]
    fn low_q_reseeds_energy() {
        let regen = Regen::new(Config::default());
        let state = CavityState {
            gain: 0.4,
            energy: Energy::new::<microjoule>(5.0),
        };

        let pumped = regen.low_q(state);

        assert_relative_eq!(pumped.gain, 0.4);
        assert_relative_eq!(pumped.energy.get::<nanojoule>(), 1.0, max_relative = 1e-12);
    }

    #[test]
    fn round_trip_updates_energy_then_gain() {
        let regen = Regen::new(Config::default());
        let config = regen.config();
        let state = CavityState {
            gain: 0.3,
            energy: Energy::new::<nanojoule>(2.0),
        };

        let next = regen.round_trip(state).unwrap();

        // Energy grows with the old gain.
        let energy = 2e-9 * rk4_factor(0.3 - 0.05);
        assert_relative_eq!(next.energy.get::<joule>(), energy, max_relative = 1e-12);

        // Gain relaxes toward its fixed point with a rate set by the new energy.
        let tr = config.round_trip_time().get::<second>();
        let tau = 300e-6;
        let rate = 1.0 / tau + energy / (1e-3 * tr);
        let fixed = (0.4 / tau) / rate;
        let gain = fixed + (0.3 - fixed) * rk4_factor(-rate * tr);
        assert_relative_eq!(next.gain, gain, max_relative = 1e-12);
    }

    #[test]
    fn nominal_cavity_stays_finite_and_positive() {
        let regen = Regen::new(Config::default());

        let dumped = regen.run().unwrap();

        assert!(dumped.gain.is_finite() && dumped.gain > 0.0 && dumped.gain < 0.4);
        let energy = dumped.energy.get::<joule>();
        assert!(energy.is_finite() && energy > 1e-9);
    }

    #[test]
    fn state_machine_visits_every_phase() {
        let config = Config::new(Parameters {
            round_trips: 2,
            ..Parameters::default()
        })
        .unwrap();
        let regen = Regen::new(config);
        let state = regen.initial_state();

        let (phase, state) = regen.step(Phase::LowQ, state).unwrap();
        assert_eq!(phase, Phase::HighQ { completed: 0 });
        let (phase, state) = regen.step(phase, state).unwrap();
        assert_eq!(phase, Phase::HighQ { completed: 1 });
        let (phase, state) = regen.step(phase, state).unwrap();
        assert_eq!(phase, Phase::Dumped);

        let (phase, after) = regen.step(phase, state).unwrap();
        assert_eq!(phase, Phase::Dumped);
        assert_eq!(after, state);
    }

    #[test]
    fn observer_sees_pump_and_every_round_trip() {
        let regen = Regen::new(Config::default());

        let mut events = Vec::new();
        let solution = regen
            .run_observed(|event: &Event| {
                events.push(*event);
                None
            })
            .unwrap();

        assert_eq!(solution.status, Status::Complete);
        assert_eq!(solution.round_trips, 20);
        assert_eq!(events.len(), 21);
        assert!(matches!(events[0], Event::Pumped { .. }));
        assert!(matches!(events[20], Event::RoundTrip { round_trip: 20, .. }));
        assert_eq!(events[20].state(), solution.state);
        assert_eq!(solution.state, regen.run().unwrap());

        // Below saturation the energy grows on every pass.
        for pair in events.windows(2) {
            assert!(pair[1].state().energy > pair[0].state().energy);
        }
    }

    #[test]
    fn observer_can_stop_early() {
        let regen = Regen::new(Config::default());

        let solution = regen
            .run_observed(|event: &Event| {
                matches!(event, Event::RoundTrip { round_trip: 5, .. }).then_some(Action::StopEarly)
            })
            .unwrap();

        assert_eq!(solution.status, Status::StoppedByObserver);
        assert_eq!(solution.round_trips, 5);
    }

    #[test]
    fn saturation_limits_growth() {
        let free = Regen::new(Config::default()).run().unwrap();
        let saturated = Regen::new(
            Config::new(Parameters {
                saturation_energy: Energy::new::<microjoule>(1.0),
                ..Parameters::default()
            })
            .unwrap(),
        )
        .run()
        .unwrap();

        assert!(saturated.energy < free.energy);
        assert!(saturated.gain < free.gain);
        assert!(saturated.gain > 0.0);
    }

    #[test]
    fn pulse_train_carries_gain_between_pulses() {
        let regen = Regen::new(Config::default());

        let train = regen.pulse_train(3).unwrap();

        assert_eq!(train.len(), 3);
        assert_eq!(train[0], regen.run().unwrap());
        // Later pulses start their recovery from a gain above zero.
        assert!(train[1].energy > train[0].energy);
        for state in &train {
            assert!(state.is_finite());
            assert!(state.gain > 0.0);
        }
    }

    #[test]
    fn explicit_round_trip_time_drives_the_same_cavity() {
        let tr = 2.0 * 1.6 / 299_792_458.0;
        let explicit = Config::new(Parameters {
            round_trip: RoundTrip::Time(Time::new::<nanosecond>(tr * 1e9)),
            ..Parameters::default()
        })
        .unwrap();

        let a = Regen::new(Config::default()).run().unwrap();
        let b = Regen::new(explicit).run().unwrap();

        assert_relative_eq!(a.gain, b.gain, max_relative = 1e-9);
        assert_relative_eq!(
            a.energy.get::<joule>(),
            b.energy.get::<joule>(),
            max_relative = 1e-9
        );
    }

    #[test]
    fn zero_round_trips_dumps_after_pumping() {
        let regen = Regen::new(
            Config::new(Parameters {
                round_trips: 0,
                ..Parameters::default()
            })
            .unwrap(),
        );

        let solution = regen.run_observed(()).unwrap();

        assert_eq!(solution.status, Status::Complete);
        assert_eq!(solution.round_trips, 0);
        assert_eq!(solution.state, regen.low_q(regen.initial_state()));
    }
}
