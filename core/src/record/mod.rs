pub mod haptic;
pub mod store;

pub use haptic::{deserialize, serialize, HapticPatternRecord};
pub use store::{AppendedPatternFile, PatternStore, DEFAULT_APPENDED_DIR, DEFAULT_PATTERN_DIR};
