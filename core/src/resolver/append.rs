use crate::pattern::ComposedPattern;
use crate::prelude::{PatternError, PatternResult};

pub const MIN_APPEND_INPUTS: usize = 2;

/// Concatenates patterns into one sequence, renumbering segments so each
/// input plays after the previous one.
pub fn append_patterns(patterns: &[ComposedPattern]) -> PatternResult<ComposedPattern> {
    if patterns.len() < MIN_APPEND_INPUTS {
        return Err(PatternError::EmptyInput(patterns.len()));
    }

    let mut pulses = Vec::with_capacity(patterns.iter().map(ComposedPattern::len).sum());
    let mut offset = 0;
    for pattern in patterns {
        pulses.extend(pattern.pulses().iter().map(|pulse| {
            let mut pulse = *pulse;
            pulse.segment += offset;
            pulse
        }));
        offset += pattern.segment_count();
    }

    Ok(ComposedPattern::new(pulses))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::muscle::{Muscle, MuscleGroup, MuscleSelection};
    use crate::pattern::PulseParameters;
    use crate::resolver::{compose_pattern, resolve_muscles};

    fn pattern_for(group: MuscleGroup, intensity: u32) -> ComposedPattern {
        let targets = resolve_muscles(&MuscleSelection::group(group)).unwrap();
        let pulse = PulseParameters {
            intensity,
            ..Default::default()
        };
        compose_pattern(&targets, &pulse).unwrap()
    }

    #[test]
    fn single_pattern_is_rejected() {
        let pattern = pattern_for(MuscleGroup::Front, 30);
        assert!(matches!(
            append_patterns(&[pattern]),
            Err(PatternError::EmptyInput(1))
        ));
        assert!(matches!(
            append_patterns(&[]),
            Err(PatternError::EmptyInput(0))
        ));
    }

    #[test]
    fn appended_pattern_preserves_input_order() {
        let front = pattern_for(MuscleGroup::Front, 30);
        let back = pattern_for(MuscleGroup::Back, 60);

        let combined = append_patterns(&[front.clone(), back.clone()]).unwrap();
        assert_eq!(combined.len(), front.len() + back.len());
        assert_eq!(combined.segment_count(), 2);

        let muscles: Vec<Muscle> = combined.muscles().collect();
        assert_eq!(&muscles[..6], &Muscle::FRONT);
        assert_eq!(&muscles[6..], &Muscle::BACK);
        assert!(combined.segment(1).all(|p| p.intensity == 60));
    }

    #[test]
    fn nested_appends_keep_segments_sequential() {
        let a = pattern_for(MuscleGroup::Front, 10);
        let b = pattern_for(MuscleGroup::Back, 20);
        let ab = append_patterns(&[a.clone(), b]).unwrap();
        let aba = append_patterns(&[ab, a]).unwrap();
        assert_eq!(aba.segment_count(), 3);
        assert!(aba.segment(2).all(|p| p.intensity == 10));
    }
}
