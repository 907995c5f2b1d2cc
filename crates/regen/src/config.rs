use lightwave_core::constraint::{Constrained, ConstraintError, NonNegative, StrictlyPositive};
use thiserror::Error;
use uom::si::{
    energy::{joule, millijoule, nanojoule},
    f64::{Energy, Frequency, Length, Time},
    frequency::{hertz, kilohertz},
    length::meter,
    time::{microsecond, second},
};

use crate::spectroscopy::SPEED_OF_LIGHT;

/// How the round-trip time of the cavity is specified.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RoundTrip {
    /// Linear cavity of this length, so `Tr = 2 d / c`.
    CavityLength(Length),
    /// Explicit round-trip time.
    Time(Time),
}

/// Physical constants of a regenerative amplifier, as supplied by a caller.
///
/// Validate them into a [`Config`] with [`Config::new`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Parameters {
    /// Small-signal gain `g0`.
    pub small_signal_gain: f64,
    /// Round-trip cavity loss `l`.
    pub loss: f64,
    /// Upper-state lifetime `tau`.
    pub upper_state_lifetime: Time,
    /// Saturation energy `Esat`.
    pub saturation_energy: Energy,
    /// Energy of the seed pulse injected at the start of each high-Q phase.
    pub seed_energy: Energy,
    /// Pulse repetition rate `frep`; the dump period is `1 / frep`.
    pub repetition_rate: Frequency,
    /// Number of high-Q round trips `N`.
    pub round_trips: usize,
    pub round_trip: RoundTrip,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            small_signal_gain: 0.4,
            loss: 0.05,
            upper_state_lifetime: Time::new::<microsecond>(300.0),
            saturation_energy: Energy::new::<millijoule>(1.0),
            seed_energy: Energy::new::<nanojoule>(1.0),
            repetition_rate: Frequency::new::<kilohertz>(1.0),
            round_trips: 20,
            round_trip: RoundTrip::CavityLength(Length::new::<meter>(1.6)),
        }
    }
}

/// Errors that can occur when validating a regen config.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    #[error("small-signal gain is invalid: {0}")]
    SmallSignalGain(#[source] ConstraintError),

    #[error("cavity loss is invalid: {0}")]
    Loss(#[source] ConstraintError),

    #[error("upper-state lifetime is invalid: {0}")]
    Lifetime(#[source] ConstraintError),

    #[error("saturation energy is invalid: {0}")]
    SaturationEnergy(#[source] ConstraintError),

    #[error("seed energy is invalid: {0}")]
    SeedEnergy(#[source] ConstraintError),

    #[error("repetition rate is invalid: {0}")]
    RepetitionRate(#[source] ConstraintError),

    #[error("cavity length is invalid: {0}")]
    CavityLength(#[source] ConstraintError),

    #[error("round-trip time is invalid: {0}")]
    RoundTripTime(#[source] ConstraintError),

    #[error("gate time {gate:?} must be shorter than the dump period {period:?}")]
    GateExceedsPeriod { gate: Time, period: Time },
}

/// Validated configuration for a [`Regen`](crate::Regen).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Parameters", into = "Parameters"))]
pub struct Config {
    parameters: Parameters,
    round_trip_time: Time,
}

impl Default for Config {
    fn default() -> Self {
        // Known-good values, unwrap is safe
        Self::new(Parameters::default()).unwrap()
    }
}

impl Config {
    /// Validates the parameters and derives the cavity timings.
    ///
    /// # Errors
    ///
    /// Returns an error if a gain or loss is negative, if the lifetime,
    /// saturation energy, repetition rate, cavity length or round-trip time is
    /// not strictly positive, if the seed energy is negative, or if the gate
    /// time `N Tr` is not shorter than the dump period `1 / frep`.
    pub fn new(parameters: Parameters) -> Result<Self, ConfigError> {
        non_negative(parameters.small_signal_gain).map_err(ConfigError::SmallSignalGain)?;
        non_negative(parameters.loss).map_err(ConfigError::Loss)?;
        positive(parameters.upper_state_lifetime.get::<second>())
            .map_err(ConfigError::Lifetime)?;
        positive(parameters.saturation_energy.get::<joule>())
            .map_err(ConfigError::SaturationEnergy)?;
        non_negative(parameters.seed_energy.get::<joule>()).map_err(ConfigError::SeedEnergy)?;
        positive(parameters.repetition_rate.get::<hertz>())
            .map_err(ConfigError::RepetitionRate)?;

        let round_trip_time = match parameters.round_trip {
            RoundTrip::CavityLength(length) => {
                let d = positive(length.get::<meter>()).map_err(ConfigError::CavityLength)?;
                Time::new::<second>(2.0 * d / SPEED_OF_LIGHT)
            }
            RoundTrip::Time(time) => {
                positive(time.get::<second>()).map_err(ConfigError::RoundTripTime)?;
                time
            }
        };

        let config = Self {
            parameters,
            round_trip_time,
        };
        if config.gate_time() >= config.dump_period() {
            return Err(ConfigError::GateExceedsPeriod {
                gate: config.gate_time(),
                period: config.dump_period(),
            });
        }

        Ok(config)
    }

    /// Returns the parameters this config was built from.
    #[must_use]
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    #[must_use]
    pub fn small_signal_gain(&self) -> f64 {
        self.parameters.small_signal_gain
    }

    #[must_use]
    pub fn loss(&self) -> f64 {
        self.parameters.loss
    }

    #[must_use]
    pub fn upper_state_lifetime(&self) -> Time {
        self.parameters.upper_state_lifetime
    }

    #[must_use]
    pub fn saturation_energy(&self) -> Energy {
        self.parameters.saturation_energy
    }

    #[must_use]
    pub fn seed_energy(&self) -> Energy {
        self.parameters.seed_energy
    }

    #[must_use]
    pub fn round_trips(&self) -> usize {
        self.parameters.round_trips
    }

    /// Returns the round-trip time `Tr`.
    #[must_use]
    pub fn round_trip_time(&self) -> Time {
        self.round_trip_time
    }

    /// Returns the dump period `Td = 1 / frep`.
    #[must_use]
    pub fn dump_period(&self) -> Time {
        Time::new::<second>(1.0 / self.parameters.repetition_rate.get::<hertz>())
    }

    /// Returns the gate time `Tg = N Tr`.
    #[must_use]
    pub fn gate_time(&self) -> Time {
        self.round_trip_time * self.parameters.round_trips as f64
    }

    /// Returns the pump recovery time `Td - Tg` of the low-Q phase.
    #[must_use]
    pub fn recovery_time(&self) -> Time {
        self.dump_period() - self.gate_time()
    }
}

impl TryFrom<Parameters> for Config {
    type Error = ConfigError;

    fn try_from(parameters: Parameters) -> Result<Self, ConfigError> {
        Self::new(parameters)
    }
}

impl From<Config> for Parameters {
    fn from(config: Config) -> Self {
        config.parameters
    }
}

fn positive(value: f64) -> Result<f64, ConstraintError> {
    Constrained::<f64, StrictlyPositive>::new(value).map(Constrained::into_inner)
}

fn non_negative(value: f64) -> Result<f64, ConstraintError> {
    Constrained::<f64, NonNegative>::new(value).map(Constrained::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::time::nanosecond;

    #[test]
    fn default_timings() {
        let config = Config::default();

        let tr = 2.0 * 1.6 / 299_792_458.0;
        assert_relative_eq!(config.round_trip_time().get::<second>(), tr);
        assert_relative_eq!(config.dump_period().get::<second>(), 1e-3);
        assert_relative_eq!(config.gate_time().get::<second>(), 20.0 * tr);
        assert_relative_eq!(
            config.recovery_time().get::<second>(),
            1e-3 - 20.0 * tr,
            max_relative = 1e-12
        );
        assert_relative_eq!(config.saturation_energy().get::<joule>(), 1e-3);
    }

    #[test]
    fn explicit_round_trip_time() {
        let config = Config::new(Parameters {
            round_trip: RoundTrip::Time(Time::new::<nanosecond>(10.0)),
            ..Parameters::default()
        })
        .unwrap();

        assert_relative_eq!(config.round_trip_time().get::<nanosecond>(), 10.0);
    }

    #[test]
    fn gate_must_fit_in_dump_period() {
        let result = Config::new(Parameters {
            round_trips: 100,
            round_trip: RoundTrip::Time(Time::new::<microsecond>(10.0)),
            ..Parameters::default()
        });

        assert!(matches!(result, Err(ConfigError::GateExceedsPeriod { .. })));
    }

    #[test]
    fn rejects_invalid_parameters() {
        let check = |parameters: Parameters| Config::new(parameters).unwrap_err();

        assert_eq!(
            check(Parameters {
                upper_state_lifetime: Time::new::<second>(0.0),
                ..Parameters::default()
            }),
            ConfigError::Lifetime(ConstraintError::Zero)
        );
        assert_eq!(
            check(Parameters {
                loss: -0.1,
                ..Parameters::default()
            }),
            ConfigError::Loss(ConstraintError::Negative)
        );
        assert_eq!(
            check(Parameters {
                round_trip: RoundTrip::CavityLength(Length::new::<meter>(f64::NAN)),
                ..Parameters::default()
            }),
            ConfigError::CavityLength(ConstraintError::NotANumber)
        );
        assert_eq!(
            check(Parameters {
                repetition_rate: Frequency::new::<hertz>(-1.0),
                ..Parameters::default()
            }),
            ConfigError::RepetitionRate(ConstraintError::Negative)
        );
    }
}
