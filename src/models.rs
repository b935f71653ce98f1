use bevy::gltf::GltfAssetLabel;
use bevy::prelude::*;
use bevy::scene::SceneRoot;

/// Asset path of the human figure.
const HUMAN_MODEL_PATH: &str = "models/human.glb";
/// Asset path of the cat figure.
const CAT_MODEL_PATH: &str = "models/cat.glb";
/// World position of the cat figure.
const CAT_POSITION: Vec3 = Vec3::new(30.0, 0.0, 15.0);
/// Uniform scale applied to the cat model.
const CAT_SCALE: f32 = 0.2;
/// Lean applied to the human figure.
const HUMAN_TILT: f32 = std::f32::consts::PI / 5.0;
/// Heading applied to the cat figure.
const CAT_HEADING: f32 = std::f32::consts::PI / 4.0;
/// Skin tint applied to the human model's materials once loaded.
const HUMAN_SKIN_COLOR: Color = Color::srgb(1.0, 0.8, 0.6);

/// Marker for scene roots participating in proximity highlighting.
#[derive(Component)]
pub struct TrackedModel;

/// Marker inserted once a tracked model has a measurable mesh descendant.
#[derive(Component)]
pub struct ModelReady;

/// Material tint applied to a model's meshes when it finishes loading.
#[derive(Component)]
pub struct MaterialTint(pub Color);

#[derive(Resource, Default)]
/// Tracked model roots in selection-priority order.
///
/// Slot order is fixed at spawn time; exact-tie selection keeps the earlier
/// slot.
pub struct TrackedModels {
    /// Scene-root entities of the tracked models.
    pub slots: Vec<Entity>,
}

/// Spawn the human and cat scenes and register them for tracking.
pub fn spawn_models(mut commands: Commands, asset_server: Res<AssetServer>) {
    let human = commands
        .spawn((
            SceneRoot(asset_server.load(GltfAssetLabel::Scene(0).from_asset(HUMAN_MODEL_PATH))),
            Transform::from_rotation(Quat::from_rotation_z(HUMAN_TILT)),
            TrackedModel,
            MaterialTint(HUMAN_SKIN_COLOR),
        ))
        .id();
    let cat = commands
        .spawn((
            SceneRoot(asset_server.load(GltfAssetLabel::Scene(0).from_asset(CAT_MODEL_PATH))),
            Transform::from_translation(CAT_POSITION)
                .with_rotation(Quat::from_rotation_y(CAT_HEADING))
                .with_scale(Vec3::splat(CAT_SCALE)),
            TrackedModel,
        ))
        .id();
    commands.insert_resource(TrackedModels {
        slots: vec![human, cat],
    });
}

/// Promote tracked models to ready once their mesh hierarchy exists.
///
/// Until then a model stays out of the selector's candidate list. Readiness
/// also applies the post-load dressing: the material tint, if one was
/// requested for the model.
pub fn model_ready_system(
    mut commands: Commands,
    pending: Query<(Entity, Option<&MaterialTint>), (With<TrackedModel>, Without<ModelReady>)>,
    children_query: Query<&Children>,
    material_query: Query<&bevy::pbr::MeshMaterial3d<StandardMaterial>, With<bevy::mesh::Mesh3d>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (entity, tint) in &pending {
        let mut saw_mesh = false;
        for descendant in children_query.iter_descendants(entity) {
            let Ok(material_handle) = material_query.get(descendant) else {
                continue;
            };
            saw_mesh = true;
            if let (Some(tint), Some(material)) = (tint, materials.get_mut(&material_handle.0)) {
                material.base_color = tint.0;
            }
        }
        if saw_mesh {
            commands.entity(entity).insert(ModelReady);
            info!(model = ?entity, "tracked model ready");
        }
    }
}
