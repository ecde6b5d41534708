pub use crate::device::{ConnectionResult, ConnectionState, DeviceClient};
pub use crate::muscle::{Muscle, MuscleEntry, MuscleGroup, MuscleSelection, TargetMuscle};
pub use crate::pattern::{ComposedPattern, PulseParameters, PulseSpec};
pub use crate::record::HapticPatternRecord;

/// Common error type for resolution, persistence and device calls.
#[derive(thiserror::Error, Debug)]
pub enum PatternError {
    #[error("invalid parameter {field}: {value} outside {domain}")]
    InvalidParameter {
        field: &'static str,
        value: String,
        domain: &'static str,
    },
    #[error("selection resolves to no muscles")]
    EmptySelection,
    #[error("append needs at least 2 patterns, got {0}")]
    EmptyInput(usize),
    #[error("pattern record not found: {0}")]
    NotFound(String),
    #[error("malformed pattern record: {0}")]
    MalformedRecord(String),
    #[error("io failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("device not connected")]
    NotConnected,
    #[error("device failure: {0}")]
    Device(String),
}

impl From<serde_json::Error> for PatternError {
    fn from(err: serde_json::Error) -> Self {
        PatternError::MalformedRecord(err.to_string())
    }
}

pub type PatternResult<T> = Result<T, PatternError>;

impl PatternError {
    pub(crate) fn invalid(
        field: &'static str,
        value: impl std::fmt::Display,
        domain: &'static str,
    ) -> Self {
        PatternError::InvalidParameter {
            field,
            value: value.to_string(),
            domain,
        }
    }
}
