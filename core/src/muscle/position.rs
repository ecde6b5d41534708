use crate::prelude::{PatternError, PatternResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Actuator zones on the suit, declared in canonical anatomical order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Muscle {
    #[serde(rename = "pectoral_R")]
    PectoralRight,
    #[serde(rename = "pectoral_L")]
    PectoralLeft,
    #[serde(rename = "abdominal_R")]
    AbdominalRight,
    #[serde(rename = "abdominal_L")]
    AbdominalLeft,
    #[serde(rename = "arm_R")]
    ArmRight,
    #[serde(rename = "arm_L")]
    ArmLeft,
    #[serde(rename = "dorsal_R")]
    DorsalRight,
    #[serde(rename = "dorsal_L")]
    DorsalLeft,
    #[serde(rename = "lumbar_R")]
    LumbarRight,
    #[serde(rename = "lumbar_L")]
    LumbarLeft,
}

impl Muscle {
    pub const ALL: [Muscle; 10] = [
        Muscle::PectoralRight,
        Muscle::PectoralLeft,
        Muscle::AbdominalRight,
        Muscle::AbdominalLeft,
        Muscle::ArmRight,
        Muscle::ArmLeft,
        Muscle::DorsalRight,
        Muscle::DorsalLeft,
        Muscle::LumbarRight,
        Muscle::LumbarLeft,
    ];

    pub const FRONT: [Muscle; 6] = [
        Muscle::PectoralRight,
        Muscle::PectoralLeft,
        Muscle::AbdominalRight,
        Muscle::AbdominalLeft,
        Muscle::ArmRight,
        Muscle::ArmLeft,
    ];

    pub const BACK: [Muscle; 4] = [
        Muscle::DorsalRight,
        Muscle::DorsalLeft,
        Muscle::LumbarRight,
        Muscle::LumbarLeft,
    ];

    /// Position in the canonical ordering, which is also the device channel.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_front(self) -> bool {
        self.index() < Muscle::FRONT.len()
    }

    /// Record key, e.g. `arm_L`.
    pub fn key(self) -> &'static str {
        match self {
            Muscle::PectoralRight => "pectoral_R",
            Muscle::PectoralLeft => "pectoral_L",
            Muscle::AbdominalRight => "abdominal_R",
            Muscle::AbdominalLeft => "abdominal_L",
            Muscle::ArmRight => "arm_R",
            Muscle::ArmLeft => "arm_L",
            Muscle::DorsalRight => "dorsal_R",
            Muscle::DorsalLeft => "dorsal_L",
            Muscle::LumbarRight => "lumbar_R",
            Muscle::LumbarLeft => "lumbar_L",
        }
    }
}

impl fmt::Display for Muscle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Muscle {
    type Err = PatternError;

    fn from_str(s: &str) -> PatternResult<Self> {
        Muscle::ALL
            .iter()
            .copied()
            .find(|muscle| muscle.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PatternError::invalid("muscle", s, "a muscle key such as arm_L"))
    }
}

/// The three coarse selections offered next to the individual muscles.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MuscleGroup {
    All,
    Back,
    Front,
}

impl MuscleGroup {
    /// Order in which simultaneous group flags are resolved; the first wins.
    pub const PRIORITY: [MuscleGroup; 3] = [MuscleGroup::All, MuscleGroup::Back, MuscleGroup::Front];

    pub fn muscles(self) -> &'static [Muscle] {
        match self {
            MuscleGroup::All => &Muscle::ALL,
            MuscleGroup::Back => &Muscle::BACK,
            MuscleGroup::Front => &Muscle::FRONT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_order_matches_indices() {
        for (idx, muscle) in Muscle::ALL.iter().enumerate() {
            assert_eq!(muscle.index(), idx);
        }
        assert!(Muscle::FRONT.iter().all(|m| m.is_front()));
        assert!(Muscle::BACK.iter().all(|m| !m.is_front()));
    }

    #[test]
    fn muscle_keys_parse_case_insensitively() {
        assert_eq!("arm_L".parse::<Muscle>().unwrap(), Muscle::ArmLeft);
        assert_eq!("LUMBAR_r".parse::<Muscle>().unwrap(), Muscle::LumbarRight);
        assert!(matches!(
            "elbow_L".parse::<Muscle>(),
            Err(PatternError::InvalidParameter { field: "muscle", .. })
        ));
    }

    #[test]
    fn muscle_serializes_as_record_key() {
        let json = serde_json::to_string(&Muscle::DorsalLeft).unwrap();
        assert_eq!(json, "\"dorsal_L\"");
    }
}
