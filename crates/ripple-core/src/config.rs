use serde::{Deserialize, Serialize};
use std::{error::Error, fmt};

/// Timing and disturbance parameters of a ripple field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RippleConfig {
    /// Samples closer together than this (seconds) do not advance the simulation.
    pub min_advance: f32,
    /// Synthetic step used when the clock is (re)initialized.
    pub initial_advance: f32,
    /// Disturbance coordinates are drawn from `0..=max_coordinate`, then wrapped.
    pub max_coordinate: i32,
    /// Disturbance magnitudes are drawn from `0..=max_magnitude`.
    pub max_magnitude: i32,
}

impl Default for RippleConfig {
    fn default() -> Self {
        Self {
            min_advance: 0.05,
            initial_advance: 0.1,
            max_coordinate: 0x7fff,
            max_magnitude: 0x3ff,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RippleConfigError {
    InvalidMinAdvance(f32),
    InvalidInitialAdvance(f32),
    NegativeCoordinateRange(i32),
    MagnitudeOutOfRange { max: i32, actual: i32 },
}

impl fmt::Display for RippleConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RippleConfigError::InvalidMinAdvance(v) => {
                write!(f, "min_advance ({v}) must be finite and non-negative")
            }
            RippleConfigError::InvalidInitialAdvance(v) => {
                write!(f, "initial_advance ({v}) must be finite and positive")
            }
            RippleConfigError::NegativeCoordinateRange(v) => {
                write!(f, "max_coordinate ({v}) must be non-negative")
            }
            RippleConfigError::MagnitudeOutOfRange { max, actual } => {
                write!(f, "max_magnitude ({actual}) must be within 0..={max}")
            }
        }
    }
}

impl Error for RippleConfigError {}

impl RippleConfig {
    pub fn validate(&self) -> Result<(), RippleConfigError> {
        if !self.min_advance.is_finite() || self.min_advance < 0.0 {
            return Err(RippleConfigError::InvalidMinAdvance(self.min_advance));
        }
        if !self.initial_advance.is_finite() || self.initial_advance <= 0.0 {
            return Err(RippleConfigError::InvalidInitialAdvance(
                self.initial_advance,
            ));
        }
        if self.max_coordinate < 0 {
            return Err(RippleConfigError::NegativeCoordinateRange(
                self.max_coordinate,
            ));
        }
        if !(0..=i16::MAX as i32).contains(&self.max_magnitude) {
            return Err(RippleConfigError::MagnitudeOutOfRange {
                max: i16::MAX as i32,
                actual: self.max_magnitude,
            });
        }
        Ok(())
    }
}

/// Parameters of a headless run driven by a manual clock and a seeded RNG.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub seed: u64,
    /// Seconds between consecutive frames.
    pub frame_interval: f32,
    /// Minimum seconds between disturbances, passed to every sample.
    pub disturbance_interval: f32,
    /// Clock reading of the first frame.
    pub start_time: f32,
    pub ripple: RippleConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            frame_interval: 1.0 / 15.0,
            disturbance_interval: 0.2,
            start_time: 0.0,
            ripple: RippleConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RunConfigError {
    Ripple(RippleConfigError),
    InvalidFrameInterval(f32),
    InvalidDisturbanceInterval(f32),
    InvalidStartTime(f32),
}

impl fmt::Display for RunConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunConfigError::Ripple(e) => write!(f, "{}", e),
            RunConfigError::InvalidFrameInterval(v) => {
                write!(f, "frame_interval ({v}) must be finite and positive")
            }
            RunConfigError::InvalidDisturbanceInterval(v) => {
                write!(f, "disturbance_interval ({v}) must be finite and positive")
            }
            RunConfigError::InvalidStartTime(v) => write!(f, "start_time ({v}) must be finite"),
        }
    }
}

impl From<RippleConfigError> for RunConfigError {
    fn from(err: RippleConfigError) -> Self {
        RunConfigError::Ripple(err)
    }
}

impl Error for RunConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RunConfigError::Ripple(e) => Some(e),
            _ => None,
        }
    }
}

impl RunConfig {
    pub fn validate(&self) -> Result<(), RunConfigError> {
        self.ripple.validate()?;
        if !self.frame_interval.is_finite() || self.frame_interval <= 0.0 {
            return Err(RunConfigError::InvalidFrameInterval(self.frame_interval));
        }
        if !self.disturbance_interval.is_finite() || self.disturbance_interval <= 0.0 {
            return Err(RunConfigError::InvalidDisturbanceInterval(
                self.disturbance_interval,
            ));
        }
        if !self.start_time.is_finite() {
            return Err(RunConfigError::InvalidStartTime(self.start_time));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(RippleConfig::default().validate(), Ok(()));
        assert_eq!(RunConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_out_of_range_magnitude() {
        let config = RippleConfig {
            max_magnitude: 40_000,
            ..RippleConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(RippleConfigError::MagnitudeOutOfRange {
                max: 32767,
                actual: 40_000
            })
        );
    }

    #[test]
    fn run_config_wraps_ripple_errors() {
        let config = RunConfig {
            ripple: RippleConfig {
                initial_advance: 0.0,
                ..RippleConfig::default()
            },
            ..RunConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(
            err,
            RunConfigError::Ripple(RippleConfigError::InvalidInitialAdvance(0.0))
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn rejects_non_positive_frame_interval() {
        let config = RunConfig {
            frame_interval: 0.0,
            ..RunConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(RunConfigError::InvalidFrameInterval(0.0))
        );
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: RunConfig = serde_json::from_str(r#"{"seed": 7, "ripple": {"max_magnitude": 100}}"#)
            .expect("valid json");
        assert_eq!(config.seed, 7);
        assert_eq!(config.ripple.max_magnitude, 100);
        assert_eq!(config.ripple.min_advance, 0.05);
        assert_eq!(config.frame_interval, RunConfig::default().frame_interval);
    }
}
