use crate::prelude::{PatternError, PatternResult};
use serde::{Deserialize, Serialize};

pub const FREQUENCY_RANGE: std::ops::RangeInclusive<u32> = 1..=100;
pub const INTENSITY_RANGE: std::ops::RangeInclusive<u32> = 1..=100;
pub const RAMP_RANGE: std::ops::RangeInclusive<f32> = 0.0..=2.0;

/// Timing and strength of a single pulse, shared by every target muscle.
///
/// Times are seconds. The `rampUpInMills`/`rampDownInMills` keys keep the
/// names used by existing record files even though the values are seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PulseParameters {
    /// Hz.
    pub frequency: u32,
    pub duration: f32,
    /// Percent of full strength.
    #[serde(rename = "intensityPercentage")]
    pub intensity: u32,
    #[serde(rename = "rampUpInMills")]
    pub ramp_up: f32,
    #[serde(rename = "rampDownInMills")]
    pub ramp_down: f32,
    #[serde(rename = "exitDelay")]
    pub exit_delay: f32,
}

impl Default for PulseParameters {
    fn default() -> Self {
        Self {
            frequency: 100,
            duration: 1.0,
            intensity: 25,
            ramp_up: 0.0,
            ramp_down: 0.0,
            exit_delay: 0.0,
        }
    }
}

impl PulseParameters {
    /// Pulse played on every muscle right after the suit connects.
    pub const STARTUP: PulseParameters = PulseParameters {
        frequency: 100,
        duration: 1.0,
        intensity: 25,
        ramp_up: 1.0,
        ramp_down: 1.0,
        exit_delay: 0.0,
    };

    pub fn validate(&self) -> PatternResult<()> {
        if !FREQUENCY_RANGE.contains(&self.frequency) {
            return Err(PatternError::invalid("frequency", self.frequency, "[1, 100] Hz"));
        }
        validate_intensity("intensity", self.intensity)?;
        validate_seconds("duration", self.duration)?;
        validate_ramp("ramp_up", self.ramp_up)?;
        validate_ramp("ramp_down", self.ramp_down)?;
        validate_seconds("exit_delay", self.exit_delay)?;
        Ok(())
    }
}

pub(crate) fn validate_intensity(field: &'static str, value: u32) -> PatternResult<()> {
    if INTENSITY_RANGE.contains(&value) {
        Ok(())
    } else {
        Err(PatternError::invalid(field, value, "[1, 100] %"))
    }
}

fn validate_ramp(field: &'static str, value: f32) -> PatternResult<()> {
    if RAMP_RANGE.contains(&value) {
        Ok(())
    } else {
        Err(PatternError::invalid(field, value, "[0, 2] s"))
    }
}

fn validate_seconds(field: &'static str, value: f32) -> PatternResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(PatternError::invalid(field, value, ">= 0 s"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_and_startup_are_valid() {
        PulseParameters::default().validate().unwrap();
        PulseParameters::STARTUP.validate().unwrap();
    }

    #[test]
    fn frequency_outside_domain_is_rejected() {
        let params = PulseParameters {
            frequency: 0,
            ..Default::default()
        };
        let err = params.validate().unwrap_err();
        assert!(matches!(
            err,
            PatternError::InvalidParameter {
                field: "frequency",
                ..
            }
        ));
    }

    #[test]
    fn ramp_nan_and_overflow_are_rejected() {
        for ramp in [f32::NAN, 2.5, -0.1] {
            let params = PulseParameters {
                ramp_down: ramp,
                ..Default::default()
            };
            assert!(params.validate().is_err(), "ramp {} accepted", ramp);
        }
    }

    #[test]
    fn intensity_bounds_are_inclusive() {
        for intensity in [1, 100] {
            let params = PulseParameters {
                intensity,
                ..Default::default()
            };
            params.validate().unwrap();
        }
        let params = PulseParameters {
            intensity: 101,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }
}
