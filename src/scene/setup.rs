use bevy::asset::RenderAssetUsages;
use bevy::image::{ImageAddressMode, ImageSampler, ImageSamplerDescriptor};
use bevy::math::Affine2;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};

use crate::scene::sky::{SunDisc, sun_texture};
use crate::timeline::SequenceCamera;

/// World-space sun position shared by the light and the sky disc.
const SUN_POSITION: Vec3 = Vec3::new(10.0, 60.0, 200.0);
/// Distance at which the sun disc is rendered from the camera.
const SUN_DISC_DISTANCE: f32 = 400.0;
/// Rendered side length of the sun disc quad.
const SUN_DISC_SIZE: f32 = 40.0;
/// Pixel size of the generated sun texture.
const SUN_TEXTURE_SIZE: u32 = 256;
/// Directional sunlight intensity.
const SUN_ILLUMINANCE: f32 = 80_000.0;
/// Clear-color used for the sky background.
const SKY_COLOR: Color = Color::srgb(0.54, 0.71, 0.92);
/// Global ambient-light brightness.
const AMBIENT_BRIGHTNESS: f32 = 300.0;
/// Radius of the circular ground plane.
const FLOOR_RADIUS: f32 = 1000.0;
/// Tile repetitions across the floor plane.
const FLOOR_TEXTURE_REPEAT: f32 = 100.0;
/// Pixel size of the generated floor tile texture.
const FLOOR_TEXTURE_SIZE: u32 = 128;
/// Camera position before the authored sequence takes over.
const CAMERA_SPAWN: Vec3 = Vec3::new(0.0, 2.0, 12.0);

/// Build the static scene: sky, sunlight, floor, and the animated camera.
pub fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut images: ResMut<Assets<Image>>,
) {
    setup_environment(&mut commands);
    spawn_sun(&mut commands, &mut meshes, &mut materials, &mut images);
    spawn_floor(&mut commands, &mut meshes, &mut materials, &mut images);
    spawn_camera(&mut commands);
}

/// Insert global background and ambient-light resources.
fn setup_environment(commands: &mut Commands) {
    // Sky-like background color.
    commands.insert_resource(ClearColor(SKY_COLOR));
    // Global ambient light so shadowed model faces stay readable.
    commands.insert_resource(bevy::light::GlobalAmbientLight {
        color: Color::WHITE,
        brightness: AMBIENT_BRIGHTNESS,
        affects_lightmapped_meshes: true,
    });
}

/// Spawn the directional sun light and its sky disc.
fn spawn_sun(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
    images: &mut ResMut<Assets<Image>>,
) {
    commands.spawn((
        bevy::light::DirectionalLight {
            illuminance: SUN_ILLUMINANCE,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_translation(SUN_POSITION).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    let texture = images.add(sun_texture(SUN_TEXTURE_SIZE));
    let material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        base_color_texture: Some(texture),
        unlit: true,
        alpha_mode: AlphaMode::Blend,
        cull_mode: None,
        ..default()
    });
    commands.spawn((
        bevy::mesh::Mesh3d(meshes.add(Rectangle::new(SUN_DISC_SIZE, SUN_DISC_SIZE))),
        bevy::pbr::MeshMaterial3d(material),
        Transform::default(),
        bevy::light::NotShadowCaster,
        SunDisc::toward(SUN_POSITION, SUN_DISC_DISTANCE),
    ));
}

/// Spawn the textured circular ground plane.
fn spawn_floor(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
    images: &mut ResMut<Assets<Image>>,
) {
    let texture = images.add(floor_texture(FLOOR_TEXTURE_SIZE));
    let material = materials.add(StandardMaterial {
        base_color_texture: Some(texture),
        uv_transform: Affine2::from_scale(Vec2::splat(FLOOR_TEXTURE_REPEAT)),
        perceptual_roughness: 0.9,
        ..default()
    });
    commands.spawn((
        bevy::mesh::Mesh3d(meshes.add(Circle::new(FLOOR_RADIUS))),
        bevy::pbr::MeshMaterial3d(material),
        // Lay the disc flat so +Y is up.
        Transform::from_rotation(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2)),
    ));
}

/// Spawn the sequence-driven perspective camera.
fn spawn_camera(commands: &mut Commands) {
    commands.spawn((
        bevy::camera::Camera3d::default(),
        Transform::from_translation(CAMERA_SPAWN).looking_at(Vec3::new(0.0, 1.0, 0.0), Vec3::Y),
        SequenceCamera,
    ));
}

/// Draw a repeating tile texture: light fill with darker grout lines.
fn floor_texture(size: u32) -> Image {
    let mut tile = image::RgbaImage::new(size, size);
    let grout = size / 16;
    for (x, y, pixel) in tile.enumerate_pixels_mut() {
        let on_grout = x < grout || y < grout || x >= size - grout || y >= size - grout;
        *pixel = if on_grout {
            image::Rgba([126, 120, 112, 255])
        } else {
            image::Rgba([196, 190, 180, 255])
        };
    }
    let extent = Extent3d {
        width: size,
        height: size,
        depth_or_array_layers: 1,
    };
    let mut texture = Image::new_fill(
        extent,
        TextureDimension::D2,
        &[0, 0, 0, 0],
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::default(),
    );
    texture.data = Some(tile.into_raw());
    texture.sampler = ImageSampler::Descriptor(ImageSamplerDescriptor {
        address_mode_u: ImageAddressMode::Repeat,
        address_mode_v: ImageAddressMode::Repeat,
        ..ImageSamplerDescriptor::linear()
    });
    texture
}
