//! Detector output (one inference) and the pipeline's timestamped sample

use serde::{Deserialize, Serialize};

use super::Keypoint;

/// One detected body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    #[serde(default)]
    pub keypoints: Vec<Keypoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,
}

/// One inference result: `{poses, modelName}`
///
/// An empty `poses` list means nothing was detected this tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoseFrame {
    #[serde(default)]
    pub poses: Vec<Pose>,
    #[serde(default)]
    pub model_name: String,
}

impl PoseFrame {
    pub fn new(poses: Vec<Pose>, model_name: impl Into<String>) -> Self {
        Self {
            poses,
            model_name: model_name.into(),
        }
    }

    /// Frame with a single body
    pub fn single(keypoints: Vec<Keypoint>) -> Self {
        Self::new(
            vec![Pose {
                keypoints,
                score: None,
            }],
            "",
        )
    }

    /// First detected body, if any
    pub fn primary(&self) -> Option<&Pose> {
        self.poses.first()
    }
}

/// Keypoints captured at time `t` (milliseconds)
///
/// Keypoints keep the order requested from the extractor. A name is simply
/// missing when the frame did not contain it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedKeypointSet {
    pub t: f64,
    pub keypoints: Vec<Keypoint>,
}

impl TimedKeypointSet {
    pub fn new(t: f64, keypoints: Vec<Keypoint>) -> Self {
        Self { t, keypoints }
    }

    /// Look a keypoint up by name
    pub fn get(&self, name: &str) -> Option<&Keypoint> {
        self.keypoints.iter().find(|kp| kp.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.keypoints.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_detector_frame() {
        let json = r#"{
            "poses": [{"score": 0.8, "keypoints": [
                {"name": "nose", "x": 1, "y": 2, "score": 0.9},
                {"name": "left_eye", "x": 3, "y": 4}
            ]}],
            "modelName": "movenet"
        }"#;
        let frame: PoseFrame = serde_json::from_str(json).unwrap();
        assert_eq!(frame.model_name, "movenet");
        let pose = frame.primary().unwrap();
        assert_eq!(pose.keypoints.len(), 2);
        assert_eq!(pose.keypoints[1].score, None);
    }

    #[test]
    fn test_empty_frame_has_no_primary() {
        let frame: PoseFrame = serde_json::from_str(r#"{"poses": [], "modelName": "movenet"}"#).unwrap();
        assert!(frame.primary().is_none());
    }

    #[test]
    fn test_lookup_by_name() {
        let set = TimedKeypointSet::new(
            5.0,
            vec![
                Keypoint::new("left_wrist", 1.0, 1.0, None),
                Keypoint::new("right_wrist", 2.0, 2.0, None),
            ],
        );
        assert_eq!(set.get("right_wrist").map(|kp| kp.x), Some(2.0));
        assert!(set.get("nose").is_none());
    }
}
