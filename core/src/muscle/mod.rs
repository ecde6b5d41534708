pub mod position;
pub mod selection;

pub use position::{Muscle, MuscleGroup};
pub use selection::{MuscleEntry, MuscleSelection, TargetMuscle};
