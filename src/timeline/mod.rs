use bevy::prelude::*;

mod sequence;

pub use sequence::{CameraKeyframe, CameraSequence, SequenceError};

use crate::scroll::ScrollTracker;

/// On-disk location of the authored camera path.
const SEQUENCE_PATH: &str = "assets/camera_sequence.json";

/// Marker for the camera driven by the authored sequence.
#[derive(Component)]
pub struct SequenceCamera;

#[derive(Resource, Default)]
/// Scrub state over the authored camera sequence.
pub struct CameraTimeline {
    /// Bound sequence; `None` until the authored blob is loaded.
    sequence: Option<CameraSequence>,
    /// Current scrub position in seconds, within `[0, length]`.
    position: f32,
}

impl CameraTimeline {
    /// Bind an authored sequence, resetting the scrub position.
    pub fn bind(&mut self, sequence: CameraSequence) {
        self.sequence = Some(sequence);
        self.position = 0.0;
    }

    /// Total sequence length in seconds, 0 while unbound.
    pub fn length(&self) -> f32 {
        self.sequence
            .as_ref()
            .map(CameraSequence::length)
            .unwrap_or(0.0)
    }

    /// Current scrub position in seconds.
    pub fn position(&self) -> f32 {
        self.position
    }

    /// Map a normalized scroll offset onto the sequence.
    ///
    /// No-op while unbound; the sequence may simply not be ready yet.
    pub fn scrub(&mut self, offset: f32) {
        let Some(sequence) = &self.sequence else {
            return;
        };
        let length = sequence.length();
        self.position = (offset * length).clamp(0.0, length);
    }

    /// Camera transform at the current scrub position, `None` while unbound.
    pub fn current_transform(&self) -> Option<Transform> {
        self.sequence
            .as_ref()
            .map(|sequence| sequence.sample(self.position))
    }
}

/// Load and bind the authored camera sequence at startup.
///
/// A missing or malformed file leaves the timeline unbound; scrubbing then
/// stays a no-op and the camera keeps its spawn transform.
pub fn load_camera_sequence(mut commands: Commands) {
    let mut timeline = CameraTimeline::default();
    match std::fs::read_to_string(SEQUENCE_PATH) {
        Ok(raw) => match CameraSequence::from_json(&raw) {
            Ok(sequence) => {
                info!(length = sequence.length(), "camera sequence bound");
                timeline.bind(sequence);
            }
            Err(err) => warn!("camera sequence rejected: {err}"),
        },
        Err(err) => warn!("camera sequence not read from {SEQUENCE_PATH}: {err}"),
    }
    commands.insert_resource(timeline);
}

/// Bind the scroll offset to the sequence position, once per frame.
pub fn timeline_scrub_system(scroll: Res<ScrollTracker>, mut timeline: ResMut<CameraTimeline>) {
    timeline.scrub(scroll.offset());
}

/// Apply the sampled sequence transform to the animated camera.
pub fn apply_camera_sequence_system(
    timeline: Res<CameraTimeline>,
    mut camera_query: Query<&mut Transform, With<SequenceCamera>>,
) {
    let Some(sampled) = timeline.current_transform() else {
        return;
    };
    for mut transform in &mut camera_query {
        *transform = sampled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEQUENCE_JSON: &str = r#"{
        "name": "scrub test",
        "keyframes": [
            { "time": 0.0, "position": [0.0, 0.0, 0.0], "look_at": [0.0, 0.0, -1.0] },
            { "time": 10.0, "position": [1.0, 0.0, 0.0], "look_at": [1.0, 0.0, -1.0] }
        ]
    }"#;

    /// Verify a 0.5 offset on a length-10 sequence scrubs to exactly 5.
    #[test]
    fn scrub_maps_offset_onto_length() {
        let mut timeline = CameraTimeline::default();
        timeline.bind(CameraSequence::from_json(SEQUENCE_JSON).unwrap());
        timeline.scrub(0.5);
        assert_eq!(timeline.position(), 5.0);
        assert_eq!(timeline.length(), 10.0);
    }

    /// Verify scrub positions clamp into the sequence range.
    #[test]
    fn scrub_clamps_into_sequence_range() {
        let mut timeline = CameraTimeline::default();
        timeline.bind(CameraSequence::from_json(SEQUENCE_JSON).unwrap());
        timeline.scrub(2.0);
        assert_eq!(timeline.position(), 10.0);
    }

    /// Verify scrubbing an unbound timeline is a no-op, not an error.
    #[test]
    fn scrub_without_sequence_is_a_noop() {
        let mut timeline = CameraTimeline::default();
        timeline.scrub(0.7);
        assert_eq!(timeline.position(), 0.0);
        assert_eq!(timeline.length(), 0.0);
        assert!(timeline.current_transform().is_none());
    }
}
