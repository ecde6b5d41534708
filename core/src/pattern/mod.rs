pub mod composed;
pub mod pulse;

pub use composed::{ComposedPattern, PulseSpec};
pub use pulse::PulseParameters;
