use bevy::prelude::*;

use crate::models::{ModelReady, TrackedModel, TrackedModels};

/// Camera-to-model distance below which a tracked model can be highlighted.
pub const CROSSHAIR_THRESHOLD: f32 = 40.0;

/// One selectable entry: a tracked entity and its world position.
#[derive(Clone, Copy)]
pub struct Candidate {
    /// Tracked model root.
    pub entity: Entity,
    /// World position of the model root.
    pub position: Vec3,
}

impl Candidate {
    /// Build a candidate from a tracked entity and its world position.
    pub fn new(entity: Entity, position: Vec3) -> Self {
        Self { entity, position }
    }
}

#[derive(Resource, Default)]
/// Currently highlighted tracked model, if any.
pub struct SelectionState {
    /// Entity holding the highlight, `None` while nothing is in range.
    pub current: Option<Entity>,
}

impl SelectionState {
    /// Store `new_target` only when it differs from the current one.
    ///
    /// Returns whether a transition occurred. An unchanged selection must not
    /// be rewritten, so downstream consumers see a change exactly when the
    /// highlighted entity actually moved.
    pub fn retarget(&mut self, new_target: Option<Entity>) -> bool {
        if self.current == new_target {
            return false;
        }
        self.current = new_target;
        true
    }
}

/// Pick the nearest candidate strictly within `threshold` of the camera.
///
/// Folds left to right with accumulator `(None, threshold)`, replacing it only
/// when a candidate is strictly closer than the held distance. The earliest
/// entry therefore wins exact ties, and a distance equal to `threshold` never
/// selects. `None` entries are models still loading and are skipped.
pub fn select_nearest_in_range(
    camera_position: Vec3,
    candidates: &[Option<Candidate>],
    threshold: f32,
) -> Option<Entity> {
    candidates
        .iter()
        .flatten()
        .map(|candidate| (candidate.entity, camera_position.distance(candidate.position)))
        .fold(
            (None, threshold),
            |(held, held_distance), (entity, distance)| {
                if distance < held_distance {
                    (Some(entity), distance)
                } else {
                    (held, held_distance)
                }
            },
        )
        .0
}

/// Re-evaluate the highlighted model from the current camera position.
pub fn selection_system(
    camera_query: Query<&Transform, With<bevy::camera::Camera3d>>,
    tracked: Res<TrackedModels>,
    model_query: Query<(&Transform, Has<ModelReady>), With<TrackedModel>>,
    mut selection: ResMut<SelectionState>,
) {
    let Ok(camera_transform) = camera_query.single() else {
        return;
    };
    // Slot order is fixed at spawn; an unready model contributes `None`.
    let candidates: Vec<Option<Candidate>> = tracked
        .slots
        .iter()
        .map(|&entity| match model_query.get(entity) {
            Ok((transform, true)) => Some(Candidate::new(entity, transform.translation)),
            _ => None,
        })
        .collect();
    let new_target = select_nearest_in_range(
        camera_transform.translation,
        &candidates,
        CROSSHAIR_THRESHOLD,
    );
    // Explicit equality gate so an unchanged selection never dirties the
    // resource and retriggers overlay rebuilds.
    if selection.current != new_target {
        selection.retarget(new_target);
        info!(selected = ?selection.current, "highlight target changed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Allocate `n` distinct entity ids without an app.
    fn entities(n: usize) -> Vec<Entity> {
        let mut world = World::new();
        (0..n).map(|_| world.spawn_empty().id()).collect()
    }

    /// Verify the closer of two in-range candidates wins.
    #[test]
    fn nearest_candidate_wins() {
        let ids = entities(2);
        let candidates = [
            Some(Candidate::new(ids[0], Vec3::new(5.0, 0.0, 0.0))),
            Some(Candidate::new(ids[1], Vec3::new(3.0, 0.0, 0.0))),
        ];
        let picked = select_nearest_in_range(Vec3::ZERO, &candidates, 40.0);
        assert_eq!(picked, Some(ids[1]));
    }

    /// Verify a distance exactly at the threshold does not select.
    #[test]
    fn distance_equal_to_threshold_is_excluded() {
        let ids = entities(1);
        let candidates = [Some(Candidate::new(ids[0], Vec3::new(40.0, 0.0, 0.0)))];
        assert_eq!(select_nearest_in_range(Vec3::ZERO, &candidates, 40.0), None);
        let candidates = [Some(Candidate::new(ids[0], Vec3::new(39.9, 0.0, 0.0)))];
        assert_eq!(
            select_nearest_in_range(Vec3::ZERO, &candidates, 40.0),
            Some(ids[0])
        );
    }

    /// Verify the earlier list entry wins an exact distance tie.
    #[test]
    fn exact_tie_keeps_earlier_candidate() {
        let ids = entities(2);
        let candidates = [
            Some(Candidate::new(ids[0], Vec3::new(5.0, 0.0, 0.0))),
            Some(Candidate::new(ids[1], Vec3::new(0.0, 5.0, 0.0))),
        ];
        let picked = select_nearest_in_range(Vec3::ZERO, &candidates, 40.0);
        assert_eq!(picked, Some(ids[0]));
    }

    /// Verify still-loading slots are skipped, not treated as candidates.
    #[test]
    fn loading_slots_are_skipped() {
        let ids = entities(1);
        let candidates = [None, Some(Candidate::new(ids[0], Vec3::new(5.0, 0.0, 0.0)))];
        let picked = select_nearest_in_range(Vec3::ZERO, &candidates, 40.0);
        assert_eq!(picked, Some(ids[0]));
    }

    /// Verify nothing is selected when every candidate is out of range.
    #[test]
    fn out_of_range_returns_none() {
        let ids = entities(1);
        let candidates = [Some(Candidate::new(ids[0], Vec3::new(50.0, 0.0, 0.0)))];
        assert_eq!(select_nearest_in_range(Vec3::ZERO, &candidates, 40.0), None);
    }

    /// Verify re-applying the same target reports no state transition.
    #[test]
    fn retarget_is_stable_for_unchanged_target() {
        let ids = entities(1);
        let mut selection = SelectionState::default();
        assert!(selection.retarget(Some(ids[0])));
        assert!(!selection.retarget(Some(ids[0])));
        assert_eq!(selection.current, Some(ids[0]));
        assert!(selection.retarget(None));
        assert!(!selection.retarget(None));
    }
}
