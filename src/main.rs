use bevy::prelude::*;

mod crosshair;
mod highlight;
mod models;
mod scene;
mod scroll;
mod timeline;

use crosshair::{overlay_billboard_system, overlay_sync_system, setup_crosshair_assets};
use highlight::{SelectionState, selection_system};
use models::{model_ready_system, spawn_models};
use scene::{setup_scene, sun_billboard_system};
use scroll::{ScrollTracker, scroll_input_system};
use timeline::{apply_camera_sequence_system, load_camera_sequence, timeline_scrub_system};

// App entry point and system registration.
fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .init_resource::<ScrollTracker>()
        .init_resource::<SelectionState>()
        .add_systems(
            Startup,
            (
                setup_scene,
                setup_crosshair_assets,
                spawn_models,
                load_camera_sequence,
            ),
        )
        .add_systems(
            Update,
            (
                scroll_input_system,
                (timeline_scrub_system, apply_camera_sequence_system).chain(),
                model_ready_system,
                // Overlay sync reads the selection written this frame.
                (selection_system, overlay_sync_system).chain(),
            ),
        )
        .add_systems(PostUpdate, (overlay_billboard_system, sun_billboard_system))
        .run();
}
