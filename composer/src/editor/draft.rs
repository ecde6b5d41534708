use clap::{Args, ValueEnum};
use hapticore::muscle::{Muscle, MuscleEntry, MuscleGroup, MuscleSelection};
use hapticore::pattern::PulseParameters;
use hapticore::record::HapticPatternRecord;
use hapticore::resolver::normalize_edit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GroupArg {
    All,
    Front,
    Back,
}

impl From<GroupArg> for MuscleGroup {
    fn from(arg: GroupArg) -> Self {
        match arg {
            GroupArg::All => MuscleGroup::All,
            GroupArg::Front => MuscleGroup::Front,
            GroupArg::Back => MuscleGroup::Back,
        }
    }
}

/// `arm_L` or `arm_L=40`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MuscleSpec {
    pub muscle: Muscle,
    pub intensity: Option<u32>,
}

fn parse_muscle_spec(raw: &str) -> Result<MuscleSpec, String> {
    let (key, intensity) = match raw.split_once('=') {
        Some((key, value)) => {
            let value = value
                .trim()
                .parse::<u32>()
                .map_err(|err| format!("bad intensity in {}: {}", raw, err))?;
            (key, Some(value))
        }
        None => (raw, None),
    };
    let muscle = key.parse::<Muscle>().map_err(|err| err.to_string())?;
    Ok(MuscleSpec { muscle, intensity })
}

/// Pulse and muscle settings given on the command line.
#[derive(Debug, Clone, Args)]
pub struct PatternDraft {
    /// Pulse frequency in Hz [1, 100]
    #[arg(long, default_value_t = 100)]
    pub frequency: u32,
    /// Pulse duration in seconds
    #[arg(long, default_value_t = 1.0)]
    pub duration: f32,
    /// Intensity percentage [1, 100]
    #[arg(long, default_value_t = 25)]
    pub intensity: u32,
    /// Ramp-up time in seconds [0, 2]
    #[arg(long, default_value_t = 0.0)]
    pub ramp_up: f32,
    /// Ramp-down time in seconds [0, 2]
    #[arg(long, default_value_t = 0.0)]
    pub ramp_down: f32,
    #[arg(long, default_value_t = 0.0)]
    pub exit_delay: f32,
    /// Muscle group; clears any individual muscles
    #[arg(long, value_enum)]
    pub group: Option<GroupArg>,
    /// Individual muscle, optionally with an intensity override (arm_L=40)
    #[arg(long = "muscle", value_parser = parse_muscle_spec)]
    pub muscles: Vec<MuscleSpec>,
}

impl PatternDraft {
    pub fn pulse(&self) -> PulseParameters {
        PulseParameters {
            frequency: self.frequency,
            duration: self.duration,
            intensity: self.intensity,
            ramp_up: self.ramp_up,
            ramp_down: self.ramp_down,
            exit_delay: self.exit_delay,
        }
    }

    /// Applies the draft as one edit on top of an empty selection.
    pub fn selection(&self) -> MuscleSelection {
        let mut edited = MuscleSelection::default();
        for spec in &self.muscles {
            let entry = match spec.intensity {
                Some(value) => MuscleEntry::with_override(value),
                None => MuscleEntry::used(),
            };
            *edited.entry_mut(spec.muscle) = entry;
        }
        if let Some(group) = self.group {
            edited.set_group(group.into(), true);
        }
        normalize_edit(&MuscleSelection::default(), &edited)
    }

    pub fn into_record(self, name: &str) -> HapticPatternRecord {
        HapticPatternRecord::new(name, self.selection(), self.pulse())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        draft: PatternDraft,
    }

    fn draft(args: &[&str]) -> PatternDraft {
        let mut argv = vec!["composer"];
        argv.extend_from_slice(args);
        Harness::try_parse_from(argv).unwrap().draft
    }

    #[test]
    fn defaults_match_inspector_defaults() {
        let parsed = draft(&[]);
        assert_eq!(parsed.pulse(), PulseParameters::default());
        assert_eq!(parsed.selection(), MuscleSelection::group(MuscleGroup::All));
    }

    #[test]
    fn muscle_overrides_are_parsed() {
        let parsed = draft(&["--muscle", "arm_L=40", "--muscle", "dorsal_R"]);
        let selection = parsed.selection();
        assert_eq!(selection.arm_left, MuscleEntry::with_override(40));
        assert_eq!(selection.dorsal_right, MuscleEntry::used());
        assert!(!selection.all_muscles);
    }

    #[test]
    fn group_clears_individual_muscles() {
        let parsed = draft(&["--group", "front", "--muscle", "lumbar_L"]);
        assert_eq!(parsed.selection(), MuscleSelection::group(MuscleGroup::Front));
    }

    #[test]
    fn unknown_muscle_is_a_parse_error() {
        assert!(Harness::try_parse_from(["composer", "--muscle", "knee_L"]).is_err());
        assert!(Harness::try_parse_from(["composer", "--muscle", "arm_L=loud"]).is_err());
    }
}
