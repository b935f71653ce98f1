use bevy::prelude::*;
use serde::Deserialize;
use thiserror::Error;

/// One authored sample along the camera path.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CameraKeyframe {
    /// Sequence time of this keyframe in seconds.
    pub time: f32,
    /// Camera position at this keyframe.
    pub position: [f32; 3],
    /// Point the camera looks at while passing this keyframe.
    pub look_at: [f32; 3],
}

/// Why an authored sequence blob was rejected.
#[derive(Debug, Error)]
pub enum SequenceError {
    #[error("camera sequence is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("camera sequence has no keyframes")]
    Empty,
    #[error("camera sequence keyframes are not in ascending time order")]
    Unsorted,
}

/// Pre-authored camera path: keyframes over time, sampled by scrub position.
#[derive(Debug, Clone, Deserialize)]
pub struct CameraSequence {
    /// Authoring-side name of the sequence.
    pub name: String,
    /// Keyframes in ascending time order.
    keyframes: Vec<CameraKeyframe>,
}

impl CameraSequence {
    /// Parse and validate an authored sequence blob.
    pub fn from_json(raw: &str) -> Result<Self, SequenceError> {
        let sequence: CameraSequence = serde_json::from_str(raw)?;
        if sequence.keyframes.is_empty() {
            return Err(SequenceError::Empty);
        }
        if sequence
            .keyframes
            .windows(2)
            .any(|pair| pair[0].time > pair[1].time)
        {
            return Err(SequenceError::Unsorted);
        }
        Ok(sequence)
    }

    /// Total sequence length in seconds.
    pub fn length(&self) -> f32 {
        self.keyframes.last().map(|keyframe| keyframe.time).unwrap_or(0.0)
    }

    /// Sample the camera transform at `position` seconds, clamping outside
    /// the keyframe range.
    pub fn sample(&self, position: f32) -> Transform {
        let (eye, look) = self.sample_points(position);
        Transform::from_translation(eye).looking_at(look, Vec3::Y)
    }

    /// Interpolated position/look-at pair at `position` seconds.
    fn sample_points(&self, position: f32) -> (Vec3, Vec3) {
        let Some(first) = self.keyframes.first() else {
            return (Vec3::ZERO, Vec3::NEG_Z);
        };
        if position <= first.time {
            return (
                Vec3::from_array(first.position),
                Vec3::from_array(first.look_at),
            );
        }
        for pair in self.keyframes.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            if position <= b.time {
                let span = b.time - a.time;
                // Coincident keyframe times hold the later keyframe's value.
                let t = if span > 0.0 { (position - a.time) / span } else { 1.0 };
                return (
                    Vec3::from_array(a.position).lerp(Vec3::from_array(b.position), t),
                    Vec3::from_array(a.look_at).lerp(Vec3::from_array(b.look_at), t),
                );
            }
        }
        let last = self.keyframes.last().unwrap_or(first);
        (
            Vec3::from_array(last.position),
            Vec3::from_array(last.look_at),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEQUENCE_JSON: &str = r#"{
        "name": "test path",
        "keyframes": [
            { "time": 0.0, "position": [0.0, 0.0, 0.0], "look_at": [0.0, 0.0, -1.0] },
            { "time": 10.0, "position": [10.0, 0.0, 0.0], "look_at": [10.0, 0.0, -1.0] }
        ]
    }"#;

    /// Verify a valid blob parses and reports its keyframe span as length.
    #[test]
    fn parses_and_measures_length() {
        let sequence = CameraSequence::from_json(SEQUENCE_JSON).unwrap();
        assert_eq!(sequence.name, "test path");
        assert_eq!(sequence.length(), 10.0);
    }

    /// Verify sampling interpolates linearly between keyframes.
    #[test]
    fn sampling_interpolates_between_keyframes() {
        let sequence = CameraSequence::from_json(SEQUENCE_JSON).unwrap();
        let mid = sequence.sample(5.0);
        assert_eq!(mid.translation, Vec3::new(5.0, 0.0, 0.0));
    }

    /// Verify sampling clamps outside the keyframe range.
    #[test]
    fn sampling_clamps_outside_range() {
        let sequence = CameraSequence::from_json(SEQUENCE_JSON).unwrap();
        assert_eq!(sequence.sample(-3.0).translation, Vec3::ZERO);
        assert_eq!(sequence.sample(25.0).translation, Vec3::new(10.0, 0.0, 0.0));
    }

    /// Verify invalid blobs map to the matching rejection reason.
    #[test]
    fn invalid_blobs_are_rejected() {
        let empty = r#"{ "name": "x", "keyframes": [] }"#;
        assert!(matches!(
            CameraSequence::from_json(empty),
            Err(SequenceError::Empty)
        ));
        let unsorted = r#"{
            "name": "x",
            "keyframes": [
                { "time": 5.0, "position": [0.0, 0.0, 0.0], "look_at": [0.0, 0.0, -1.0] },
                { "time": 1.0, "position": [0.0, 0.0, 0.0], "look_at": [0.0, 0.0, -1.0] }
            ]
        }"#;
        assert!(matches!(
            CameraSequence::from_json(unsorted),
            Err(SequenceError::Unsorted)
        ));
        assert!(matches!(
            CameraSequence::from_json("not json"),
            Err(SequenceError::Parse(_))
        ));
    }
}
