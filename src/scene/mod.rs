mod setup;
mod sky;

pub use setup::setup_scene;
pub use sky::sun_billboard_system;
