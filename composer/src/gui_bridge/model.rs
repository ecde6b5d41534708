use hapticore::muscle::Muscle;
use hapticore::pattern::{ComposedPattern, PulseParameters};
use hapticore::record::HapticPatternRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MuscleView {
    pub muscle: Muscle,
    pub intensity: u32,
}

/// What the bridge and the `show` command report for a saved pattern.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PatternView {
    pub name: String,
    pub muscles: Vec<MuscleView>,
    pub pulse: PulseParameters,
    pub total_duration: f32,
}

impl PatternView {
    pub fn new(record: &HapticPatternRecord, pattern: &ComposedPattern) -> Self {
        Self {
            name: record.name.clone(),
            muscles: pattern
                .pulses()
                .iter()
                .map(|pulse| MuscleView {
                    muscle: pulse.muscle,
                    intensity: pulse.intensity,
                })
                .collect(),
            pulse: record.pulse,
            total_duration: pattern.total_duration(),
        }
    }

    pub fn summary(&self) -> String {
        let muscles = self
            .muscles
            .iter()
            .map(|view| format!("{}@{}%", view.muscle, view.intensity))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "{}: {} Hz, {:.2}s, ramp {:.1}/{:.1}s, exit {:.2}s -> [{}]",
            self.name,
            self.pulse.frequency,
            self.pulse.duration,
            self.pulse.ramp_up,
            self.pulse.ramp_down,
            self.pulse.exit_delay,
            muscles
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hapticore::muscle::{MuscleEntry, MuscleSelection};
    use hapticore::resolver::resolve_record;

    #[test]
    fn summary_lists_effective_intensities() {
        let record = HapticPatternRecord::new(
            "tap",
            MuscleSelection::default()
                .with_entry(Muscle::ArmLeft, MuscleEntry::with_override(40))
                .with_entry(Muscle::ArmRight, MuscleEntry::used()),
            PulseParameters::default(),
        );
        let view = PatternView::new(&record, &resolve_record(&record).unwrap());
        assert!(view.summary().ends_with("[arm_R@25%, arm_L@40%]"));
        assert!((view.total_duration - 1.0).abs() < 1e-6);
    }
}
