use crate::muscle::position::{Muscle, MuscleGroup};
use serde::{Deserialize, Serialize};

/// Per-muscle selection with an optional intensity override.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "EntryRepr")]
pub struct MuscleEntry {
    #[serde(rename = "isUsed")]
    pub used: bool,
    #[serde(rename = "useOverride")]
    pub override_intensity: bool,
    #[serde(rename = "intensityOverride")]
    pub intensity_value: u32,
}

impl MuscleEntry {
    pub fn used() -> Self {
        Self {
            used: true,
            ..Default::default()
        }
    }

    pub fn with_override(intensity: u32) -> Self {
        Self {
            used: true,
            override_intensity: true,
            intensity_value: intensity,
        }
    }

    pub fn effective_override(&self) -> Option<u32> {
        self.override_intensity.then_some(self.intensity_value)
    }
}

/// Older records store a bare bool per muscle; newer ones store the full entry.
#[derive(Deserialize)]
#[serde(untagged)]
enum EntryRepr {
    Flag(bool),
    Fields(EntryFields),
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct EntryFields {
    #[serde(rename = "isUsed")]
    used: bool,
    #[serde(rename = "useOverride", alias = "useOveride")]
    override_intensity: bool,
    #[serde(rename = "intensityOverride", alias = "intensityOveride")]
    intensity_value: u32,
}

impl From<EntryRepr> for MuscleEntry {
    fn from(repr: EntryRepr) -> Self {
        match repr {
            EntryRepr::Flag(used) => MuscleEntry {
                used,
                ..Default::default()
            },
            EntryRepr::Fields(fields) => MuscleEntry {
                used: fields.used,
                override_intensity: fields.override_intensity,
                intensity_value: fields.intensity_value,
            },
        }
    }
}

/// Group flags plus the ten individual entries.
///
/// The flags are mutually exclusive with each other and with individual
/// entries, but only after `resolver::normalize` has run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MuscleSelection {
    #[serde(rename = "allMuscles")]
    pub all_muscles: bool,
    #[serde(rename = "backMuscles")]
    pub back_muscles: bool,
    #[serde(rename = "frontMuscles")]
    pub front_muscles: bool,
    #[serde(rename = "pectoral_R", default)]
    pub pectoral_right: MuscleEntry,
    #[serde(rename = "pectoral_L", default)]
    pub pectoral_left: MuscleEntry,
    #[serde(rename = "abdominal_R", default)]
    pub abdominal_right: MuscleEntry,
    #[serde(rename = "abdominal_L", default)]
    pub abdominal_left: MuscleEntry,
    #[serde(rename = "arm_R", default)]
    pub arm_right: MuscleEntry,
    #[serde(rename = "arm_L", default)]
    pub arm_left: MuscleEntry,
    #[serde(rename = "dorsal_R", default)]
    pub dorsal_right: MuscleEntry,
    #[serde(rename = "dorsal_L", default)]
    pub dorsal_left: MuscleEntry,
    #[serde(rename = "lumbar_R", default)]
    pub lumbar_right: MuscleEntry,
    #[serde(rename = "lumbar_L", default)]
    pub lumbar_left: MuscleEntry,
}

impl MuscleSelection {
    pub fn group(group: MuscleGroup) -> Self {
        let mut selection = Self::default();
        selection.set_group(group, true);
        selection
    }

    pub fn with_entry(mut self, muscle: Muscle, entry: MuscleEntry) -> Self {
        *self.entry_mut(muscle) = entry;
        self
    }

    pub fn has_group(&self, group: MuscleGroup) -> bool {
        match group {
            MuscleGroup::All => self.all_muscles,
            MuscleGroup::Back => self.back_muscles,
            MuscleGroup::Front => self.front_muscles,
        }
    }

    pub fn set_group(&mut self, group: MuscleGroup, value: bool) {
        match group {
            MuscleGroup::All => self.all_muscles = value,
            MuscleGroup::Back => self.back_muscles = value,
            MuscleGroup::Front => self.front_muscles = value,
        }
    }

    pub fn clear_groups(&mut self) {
        self.all_muscles = false;
        self.back_muscles = false;
        self.front_muscles = false;
    }

    pub fn active_groups(&self) -> impl Iterator<Item = MuscleGroup> + '_ {
        MuscleGroup::PRIORITY
            .into_iter()
            .filter(|group| self.has_group(*group))
    }

    pub fn entry(&self, muscle: Muscle) -> &MuscleEntry {
        match muscle {
            Muscle::PectoralRight => &self.pectoral_right,
            Muscle::PectoralLeft => &self.pectoral_left,
            Muscle::AbdominalRight => &self.abdominal_right,
            Muscle::AbdominalLeft => &self.abdominal_left,
            Muscle::ArmRight => &self.arm_right,
            Muscle::ArmLeft => &self.arm_left,
            Muscle::DorsalRight => &self.dorsal_right,
            Muscle::DorsalLeft => &self.dorsal_left,
            Muscle::LumbarRight => &self.lumbar_right,
            Muscle::LumbarLeft => &self.lumbar_left,
        }
    }

    pub fn entry_mut(&mut self, muscle: Muscle) -> &mut MuscleEntry {
        match muscle {
            Muscle::PectoralRight => &mut self.pectoral_right,
            Muscle::PectoralLeft => &mut self.pectoral_left,
            Muscle::AbdominalRight => &mut self.abdominal_right,
            Muscle::AbdominalLeft => &mut self.abdominal_left,
            Muscle::ArmRight => &mut self.arm_right,
            Muscle::ArmLeft => &mut self.arm_left,
            Muscle::DorsalRight => &mut self.dorsal_right,
            Muscle::DorsalLeft => &mut self.dorsal_left,
            Muscle::LumbarRight => &mut self.lumbar_right,
            Muscle::LumbarLeft => &mut self.lumbar_left,
        }
    }

    pub fn any_individual_used(&self) -> bool {
        Muscle::ALL.iter().any(|muscle| self.entry(*muscle).used)
    }

    /// Clears `used` on every entry; override values are kept.
    pub fn clear_individuals(&mut self) {
        for muscle in Muscle::ALL {
            self.entry_mut(muscle).used = false;
        }
    }

    /// True when no group flag and no individual muscle is selected.
    pub fn is_empty(&self) -> bool {
        self.active_groups().next().is_none() && !self.any_individual_used()
    }
}

/// A resolved target, still carrying its override rather than the final intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetMuscle {
    pub muscle: Muscle,
    pub intensity_override: Option<u32>,
}

impl TargetMuscle {
    pub fn new(muscle: Muscle) -> Self {
        Self {
            muscle,
            intensity_override: None,
        }
    }
}
