use crate::muscle::{MuscleGroup, MuscleSelection};

/// Enforces the selection invariants without edit history.
///
/// Individual muscles beat group flags. Among simultaneous group flags the
/// first in `MuscleGroup::PRIORITY` survives. An empty selection becomes
/// `allMuscles`.
pub fn normalize(selection: &MuscleSelection) -> MuscleSelection {
    let mut normalized = selection.clone();
    let first_group = normalized.active_groups().next();

    if normalized.any_individual_used() {
        normalized.clear_groups();
    } else if let Some(winner) = first_group {
        normalized.clear_groups();
        normalized.set_group(winner, true);
    } else {
        normalized.all_muscles = true;
    }

    normalized
}

/// Edit-time form: a group flag that was just switched on wins over everything
/// that was selected before, including individual muscles.
pub fn normalize_edit(previous: &MuscleSelection, current: &MuscleSelection) -> MuscleSelection {
    let raised = MuscleGroup::PRIORITY
        .into_iter()
        .find(|group| current.has_group(*group) && !previous.has_group(*group));

    match raised {
        Some(group) => {
            let mut edited = current.clone();
            edited.clear_individuals();
            edited.clear_groups();
            edited.set_group(group, true);
            edited
        }
        None => normalize(current),
    }
}
