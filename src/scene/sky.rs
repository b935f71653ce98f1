use bevy::asset::RenderAssetUsages;
use bevy::image::ImageSampler;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};

use crate::timeline::SequenceCamera;

/// Sun disc pinned to the sky at a fixed direction from the camera.
#[derive(Component)]
pub struct SunDisc {
    /// Normalized direction from the camera toward the sun.
    direction: Vec3,
    /// Render distance of the disc from the camera.
    distance: f32,
}

impl SunDisc {
    /// Place the disc along the direction of a world-space sun position.
    pub(super) fn toward(sun_position: Vec3, distance: f32) -> Self {
        Self {
            direction: sun_position.normalize_or_zero(),
            distance,
        }
    }
}

/// Keep the sun disc at its sky position relative to the camera.
pub fn sun_billboard_system(
    camera_query: Query<&Transform, (With<SequenceCamera>, Without<SunDisc>)>,
    mut sun_query: Query<(&SunDisc, &mut Transform)>,
) {
    let Ok(camera_transform) = camera_query.single() else {
        return;
    };
    for (sun, mut transform) in &mut sun_query {
        transform.translation = camera_transform.translation + sun.direction * sun.distance;
        transform.look_at(camera_transform.translation, Vec3::Y);
    }
}

/// Draw the sun disc texture: a bright core fading into a soft halo.
pub(super) fn sun_texture(size: u32) -> Image {
    let mut disc = image::RgbaImage::new(size, size);
    let center = (size as f32 - 1.0) * 0.5;
    let core = size as f32 * 0.28;
    let halo = size as f32 * 0.48;
    for (x, y, pixel) in disc.enumerate_pixels_mut() {
        let dist = Vec2::new(x as f32 - center, y as f32 - center).length();
        let alpha = if dist <= core {
            1.0
        } else {
            ((halo - dist) / (halo - core)).clamp(0.0, 1.0).powi(2)
        };
        *pixel = image::Rgba([255, 244, 214, (alpha * 255.0) as u8]);
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
    texture.data = Some(disc.into_raw());
    texture.sampler = ImageSampler::linear();
    texture
}
