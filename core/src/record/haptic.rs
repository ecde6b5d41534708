use crate::muscle::{MuscleGroup, MuscleSelection};
use crate::pattern::PulseParameters;
use crate::prelude::PatternResult;
use serde::{Deserialize, Serialize};

/// Persisted form of a pattern: its name, the selection and the pulse.
///
/// The JSON is flat; selection and pulse keys sit next to `sensationName`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HapticPatternRecord {
    #[serde(rename = "sensationName")]
    pub name: String,
    #[serde(flatten)]
    pub selection: MuscleSelection,
    #[serde(flatten)]
    pub pulse: PulseParameters,
}

impl HapticPatternRecord {
    pub fn new(name: impl Into<String>, selection: MuscleSelection, pulse: PulseParameters) -> Self {
        Self {
            name: name.into(),
            selection,
            pulse,
        }
    }

    /// Records that select nothing at all are stored and read as `allMuscles`.
    pub fn with_default_target(mut self) -> Self {
        if self.selection.is_empty() {
            self.selection.set_group(MuscleGroup::All, true);
        }
        self
    }
}

pub fn serialize(record: &HapticPatternRecord) -> PatternResult<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(record)?)
}

pub fn deserialize(bytes: &[u8]) -> PatternResult<HapticPatternRecord> {
    let record: HapticPatternRecord = serde_json::from_slice(bytes)?;
    Ok(record.with_default_target())
}
