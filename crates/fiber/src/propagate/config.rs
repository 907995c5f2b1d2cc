use super::ConfigError;

/// How many split steps a propagation takes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    /// Steps per unit of fiber length, `nz = round(rate * length)`.
    PerUnitLength(f64),
    /// A fixed step count regardless of length.
    Steps(usize),
}

/// Configuration for the split-step propagator.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Repr", into = "Repr"))]
pub struct Config {
    resolution: Resolution,
}

impl Default for Config {
    fn default() -> Self {
        // Known-good values, unwrap is safe
        Self::new(Self::DEFAULT_STEPS_PER_UNIT_LENGTH).unwrap()
    }
}

impl Config {
    /// Default longitudinal resolution.
    pub const DEFAULT_STEPS_PER_UNIT_LENGTH: f64 = 100.0;

    /// Largest number of steps a single propagation may take.
    pub const MAX_STEP_COUNT: usize = 1 << 24;

    /// Creates a new config with a validated longitudinal resolution.
    ///
    /// # Errors
    ///
    /// Returns an error if `steps_per_unit_length` is not finite and strictly positive.
    pub fn new(steps_per_unit_length: f64) -> Result<Self, ConfigError> {
        if !steps_per_unit_length.is_finite() || steps_per_unit_length <= 0.0 {
            return Err(ConfigError::StepsPerUnitLength);
        }

        Ok(Self {
            resolution: Resolution::PerUnitLength(steps_per_unit_length),
        })
    }

    /// Creates a config that takes exactly `count` steps over any positive length.
    ///
    /// # Errors
    ///
    /// Returns an error if `count` is zero or exceeds [`Config::MAX_STEP_COUNT`].
    pub fn with_step_count(count: usize) -> Result<Self, ConfigError> {
        if count == 0 || count > Self::MAX_STEP_COUNT {
            return Err(ConfigError::StepCount { count });
        }

        Ok(Self {
            resolution: Resolution::Steps(count),
        })
    }

    /// Fixed-count config for a longitudinal grid of `len` points.
    pub(crate) fn for_grid(len: usize) -> Self {
        Self {
            resolution: Resolution::Steps(len.clamp(1, Self::MAX_STEP_COUNT)),
        }
    }

    #[must_use]
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Returns the number of split steps taken per unit of fiber length, if
    /// the resolution is relative to length.
    #[must_use]
    pub fn steps_per_unit_length(&self) -> Option<f64> {
        match self.resolution {
            Resolution::PerUnitLength(rate) => Some(rate),
            Resolution::Steps(_) => None,
        }
    }

    /// Returns the step count for a fiber of `length`.
    ///
    /// Zero for a zero length. Otherwise either the fixed count or
    /// `round(steps_per_unit_length * length)` clamped to at least one.
    /// Returns `None` if that exceeds [`Config::MAX_STEP_COUNT`].
    #[must_use]
    pub fn step_count(&self, length: f64) -> Option<usize> {
        if length <= 0.0 {
            return Some(0);
        }
        match self.resolution {
            Resolution::Steps(count) => Some(count),
            Resolution::PerUnitLength(rate) => {
                let nz = (rate * length).round().max(1.0);
                #[allow(clippy::cast_precision_loss)]
                let max = Self::MAX_STEP_COUNT as f64;
                if !nz.is_finite() || nz > max {
                    return None;
                }
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let nz = nz as usize;
                Some(nz)
            }
        }
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct Repr {
    #[serde(skip_serializing_if = "Option::is_none")]
    steps_per_unit_length: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    step_count: Option<usize>,
}

#[cfg(feature = "serde")]
impl TryFrom<Repr> for Config {
    type Error = ConfigError;

    fn try_from(repr: Repr) -> Result<Self, ConfigError> {
        match (repr.steps_per_unit_length, repr.step_count) {
            (Some(rate), None) => Self::new(rate),
            (None, Some(count)) => Self::with_step_count(count),
            _ => Err(ConfigError::AmbiguousResolution),
        }
    }
}

#[cfg(feature = "serde")]
impl From<Config> for Repr {
    fn from(config: Config) -> Self {
        match config.resolution {
            Resolution::PerUnitLength(rate) => Self {
                steps_per_unit_length: Some(rate),
                step_count: None,
            },
            Resolution::Steps(count) => Self {
                steps_per_unit_length: None,
                step_count: Some(count),
            },
        }
    }
}
