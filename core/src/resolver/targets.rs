use crate::muscle::{Muscle, MuscleSelection, TargetMuscle};
use crate::prelude::{PatternError, PatternResult};

/// Resolves a selection to target muscles in canonical order.
///
/// Does not normalize; an empty result is `EmptySelection`.
pub fn resolve_muscles(selection: &MuscleSelection) -> PatternResult<Vec<TargetMuscle>> {
    let targets: Vec<TargetMuscle> = if selection.all_muscles {
        Muscle::ALL.iter().copied().map(TargetMuscle::new).collect()
    } else {
        let mut targets = half(selection, &Muscle::FRONT, selection.front_muscles);
        targets.extend(half(selection, &Muscle::BACK, selection.back_muscles));
        targets
    };

    if targets.is_empty() {
        return Err(PatternError::EmptySelection);
    }
    Ok(targets)
}

fn half(selection: &MuscleSelection, muscles: &[Muscle], whole_group: bool) -> Vec<TargetMuscle> {
    if whole_group {
        return muscles.iter().copied().map(TargetMuscle::new).collect();
    }
    muscles
        .iter()
        .filter_map(|muscle| {
            let entry = selection.entry(*muscle);
            entry.used.then(|| TargetMuscle {
                muscle: *muscle,
                intensity_override: entry.effective_override(),
            })
        })
        .collect()
}
