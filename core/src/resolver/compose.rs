use crate::muscle::TargetMuscle;
use crate::pattern::pulse::validate_intensity;
use crate::pattern::{ComposedPattern, PulseParameters, PulseSpec};
use crate::prelude::PatternResult;

/// Attaches the pulse parameters to each target as a single segment.
pub fn compose_pattern(
    targets: &[TargetMuscle],
    pulse: &PulseParameters,
) -> PatternResult<ComposedPattern> {
    pulse.validate()?;

    let pulses = targets
        .iter()
        .map(|target| {
            let intensity = match target.intensity_override {
                Some(value) => {
                    validate_intensity("intensity_override", value)?;
                    value
                }
                None => pulse.intensity,
            };
            Ok(PulseSpec {
                muscle: target.muscle,
                intensity,
                frequency: pulse.frequency,
                duration: pulse.duration,
                ramp_up: pulse.ramp_up,
                ramp_down: pulse.ramp_down,
                exit_delay: pulse.exit_delay,
                segment: 0,
            })
        })
        .collect::<PatternResult<Vec<_>>>()?;

    Ok(ComposedPattern::new(pulses))
}
