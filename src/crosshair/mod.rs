use bevy::prelude::*;

mod bounds;
mod geometry;
mod overlay;

pub use bounds::{Axis, BoundsError, TargetBounds, bounding_radius, extent_along_axis};
pub use overlay::{
    CrosshairAssets, CrosshairOverlay, overlay_billboard_system, overlay_sync_system,
    setup_crosshair_assets,
};

/// Thickness of the crosshair frame border in world units.
pub const CROSSHAIR_WIDTH: f32 = 0.1;
/// Gap kept between the target's bounds and the frame hole.
pub const CROSSHAIR_PADDING: f32 = 0.3;
/// Length of the periphery guide lines; long enough to leave any view frustum.
pub const CROSSHAIR_PERIPHERY_LINE_LENGTH: f32 = 10_000.0;
/// Highlight color shared by the frame and the guide lines.
pub const CROSSHAIR_COLOR: Color = Color::srgb(1.0, 0.65, 0.0);
