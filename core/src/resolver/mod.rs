//! Pure transforms from a muscle selection and pulse parameters to a
//! composed pattern.

pub mod append;
pub mod compose;
pub mod normalize;
pub mod targets;

pub use append::append_patterns;
pub use compose::compose_pattern;
pub use normalize::{normalize, normalize_edit};
pub use targets::resolve_muscles;

use crate::pattern::ComposedPattern;
use crate::prelude::PatternResult;
use crate::record::HapticPatternRecord;

/// Normalizes the record's selection, resolves it and composes the pattern.
pub fn resolve_record(record: &HapticPatternRecord) -> PatternResult<ComposedPattern> {
    let selection = normalize(&record.selection);
    let targets = resolve_muscles(&selection)?;
    compose_pattern(&targets, &record.pulse)
}
