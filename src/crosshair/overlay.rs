use std::collections::HashMap;

use bevy::prelude::*;

use crate::crosshair::bounds::{BoundsError, TargetBounds};
use crate::crosshair::geometry::{
    build_frame_data, frame_mesh, horizontal_line_mesh, periphery_anchors, vertical_line_mesh,
};
use crate::crosshair::{CROSSHAIR_COLOR, CROSSHAIR_PADDING, CROSSHAIR_WIDTH};
use crate::highlight::SelectionState;

/// Marker plus target bookkeeping for the spawned crosshair overlay.
#[derive(Component)]
pub struct CrosshairOverlay {
    /// Tracked model this overlay frames.
    pub target: Entity,
    /// Scaled mesh height of the target, used for vertical placement.
    pub target_height: f32,
}

impl CrosshairOverlay {
    /// World position of the overlay origin for a target at `target_position`.
    ///
    /// Centered above the target's visual bounding height.
    pub fn anchor(&self, target_position: Vec3) -> Vec3 {
        target_position
            + Vec3::Y * (CROSSHAIR_WIDTH * 2.0 + CROSSHAIR_PADDING + self.target_height / 2.0)
    }
}

#[derive(Resource)]
/// Process-wide crosshair assets: the shared guide-line geometry, the shared
/// unlit material, and frame meshes memoized per crosshair size.
pub struct CrosshairAssets {
    /// Shared static geometry for the top/bottom guide lines.
    vertical_line: Handle<Mesh>,
    /// Shared static geometry for the left/right guide lines.
    horizontal_line: Handle<Mesh>,
    /// Unlit highlight material shared by frame and lines.
    material: Handle<StandardMaterial>,
    /// Frame meshes keyed on the size's bit pattern; width and padding are
    /// fixed constants, so size alone identifies the geometry.
    frames: HashMap<u32, Handle<Mesh>>,
}

impl CrosshairAssets {
    /// Assemble the resource from pre-registered shared handles.
    pub fn new(
        vertical_line: Handle<Mesh>,
        horizontal_line: Handle<Mesh>,
        material: Handle<StandardMaterial>,
    ) -> Self {
        Self {
            vertical_line,
            horizontal_line,
            material,
            frames: HashMap::new(),
        }
    }

    /// Fetch or lazily build the frame mesh for one crosshair size.
    pub fn frame_for_size(&mut self, size: f32, meshes: &mut Assets<Mesh>) -> Handle<Mesh> {
        self.frames
            .entry(size.to_bits())
            .or_insert_with(|| {
                meshes.add(frame_mesh(build_frame_data(
                    size,
                    CROSSHAIR_WIDTH,
                    CROSSHAIR_PADDING,
                )))
            })
            .clone()
    }
}

/// Build the shared overlay geometry and material once at startup.
pub fn setup_crosshair_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let material = materials.add(StandardMaterial {
        base_color: CROSSHAIR_COLOR,
        unlit: true,
        ..default()
    });
    commands.insert_resource(CrosshairAssets::new(
        meshes.add(vertical_line_mesh()),
        meshes.add(horizontal_line_mesh()),
        material,
    ));
}

/// Rebuild the overlay entity whenever the highlighted model changes.
///
/// Target measurements are taken once and cached on the target entity, and
/// frame geometry is memoized per size, so a selection change is the only
/// thing that costs anything here.
#[allow(clippy::too_many_arguments)]
pub fn overlay_sync_system(
    mut commands: Commands,
    selection: Res<SelectionState>,
    overlay_query: Query<(Entity, &CrosshairOverlay)>,
    mut assets: ResMut<CrosshairAssets>,
    mut meshes: ResMut<Assets<Mesh>>,
    bounds_query: Query<&TargetBounds>,
    children_query: Query<&Children>,
    mesh_query: Query<(&bevy::mesh::Mesh3d, &Transform)>,
    transform_query: Query<&Transform>,
    camera_query: Query<&Transform, With<bevy::camera::Camera3d>>,
) {
    if !selection.is_changed() {
        return;
    }
    // Tear down the overlay for the previous target.
    for (entity, overlay) in &overlay_query {
        if Some(overlay.target) != selection.current {
            commands.entity(entity).despawn();
        }
    }
    let Some(target) = selection.current else {
        return;
    };
    if overlay_query
        .iter()
        .any(|(_, overlay)| overlay.target == target)
    {
        return;
    }

    let bounds = match bounds_query.get(target) {
        Ok(bounds) => *bounds,
        Err(_) => {
            match measure_target(target, &children_query, &mesh_query, &transform_query, &meshes) {
                Ok(bounds) => {
                    // Cache on the target so a re-selection skips measuring.
                    commands.entity(target).insert(bounds);
                    bounds
                }
                Err(err) => {
                    // Precondition violation: abort this overlay, loudly.
                    error!(?target, "cannot build crosshair overlay: {err}");
                    return;
                }
            }
        }
    };
    let Ok(target_transform) = transform_query.get(target) else {
        return;
    };

    let size = bounds.crosshair_size();
    let frame = assets.frame_for_size(size, &mut meshes);
    let overlay = CrosshairOverlay {
        target,
        target_height: bounds.height,
    };
    let mut transform = Transform::from_translation(overlay.anchor(target_transform.translation));
    if let Ok(camera_transform) = camera_query.single() {
        transform.rotation = camera_transform.rotation;
    }
    let anchors = periphery_anchors(size, CROSSHAIR_WIDTH * 2.0);
    let line_meshes = [
        assets.vertical_line.clone(),
        assets.vertical_line.clone(),
        assets.horizontal_line.clone(),
        assets.horizontal_line.clone(),
    ];
    commands
        .spawn((
            bevy::mesh::Mesh3d(frame),
            bevy::pbr::MeshMaterial3d(assets.material.clone()),
            transform,
            bevy::light::NotShadowCaster,
            overlay,
        ))
        .with_children(|parent| {
            for (mesh, anchor) in line_meshes.into_iter().zip(anchors) {
                parent.spawn((
                    bevy::mesh::Mesh3d(mesh),
                    bevy::pbr::MeshMaterial3d(assets.material.clone()),
                    anchor,
                    bevy::light::NotShadowCaster,
                ));
            }
        });
}

/// Locate the first mesh descendant of `target` and measure it.
fn measure_target(
    target: Entity,
    children_query: &Query<&Children>,
    mesh_query: &Query<(&bevy::mesh::Mesh3d, &Transform)>,
    transform_query: &Query<&Transform>,
    meshes: &Assets<Mesh>,
) -> Result<TargetBounds, BoundsError> {
    let root_scale = transform_query
        .get(target)
        .map(|transform| transform.scale.y)
        .unwrap_or(1.0);
    let source = children_query
        .iter_descendants(target)
        .find_map(|entity| mesh_query.get(entity).ok());
    let mesh = source.and_then(|(mesh3d, _)| meshes.get(&mesh3d.0));
    // The mesh child's uniform scale compounds with the root's.
    let scale = root_scale * source.map(|(_, transform)| transform.scale.y).unwrap_or(1.0);
    TargetBounds::measure(mesh, scale)
}

/// Keep the overlay above its target and facing the camera.
///
/// Copy-rotation billboard: the overlay takes the camera's full rotation each
/// frame, which keeps the guide lines aligned with the frame edges.
pub fn overlay_billboard_system(
    camera_query: Query<
        &Transform,
        (With<bevy::camera::Camera3d>, Without<CrosshairOverlay>),
    >,
    target_query: Query<
        &Transform,
        (Without<CrosshairOverlay>, Without<bevy::camera::Camera3d>),
    >,
    mut overlay_query: Query<(&CrosshairOverlay, &mut Transform)>,
) {
    let Ok(camera_transform) = camera_query.single() else {
        return;
    };
    for (overlay, mut transform) in &mut overlay_query {
        if let Ok(target_transform) = target_query.get(overlay.target) {
            transform.translation = overlay.anchor(target_transform.translation);
        }
        transform.rotation = camera_transform.rotation;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Verify the overlay anchor sits above the target's bounding height.
    #[test]
    fn anchor_clears_the_target_height() {
        let overlay = CrosshairOverlay {
            target: Entity::PLACEHOLDER,
            target_height: 2.0,
        };
        let anchor = overlay.anchor(Vec3::new(30.0, 0.0, 15.0));
        let lift = CROSSHAIR_WIDTH * 2.0 + CROSSHAIR_PADDING + 1.0;
        assert_eq!(anchor, Vec3::new(30.0, lift, 15.0));
    }

    /// Verify frame meshes are memoized per crosshair size.
    #[test]
    fn frame_meshes_are_memoized_by_size() {
        let mut meshes = Assets::<Mesh>::default();
        let mut assets = CrosshairAssets::new(
            Handle::default(),
            Handle::default(),
            Handle::default(),
        );
        let first = assets.frame_for_size(2.5, &mut meshes);
        let again = assets.frame_for_size(2.5, &mut meshes);
        let other = assets.frame_for_size(3.0, &mut meshes);
        assert_eq!(first, again);
        assert_ne!(first, other);
        assert_eq!(meshes.len(), 2);
    }
}
