//! Named 2D body landmark reported by the pose detector

use serde::{Deserialize, Serialize};

/// Confidence assumed when the detector omits a score
pub const FULL_CONFIDENCE: f32 = 1.0;

/// A single named keypoint (detector coordinates)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    /// Landmark name, e.g. "right_wrist"
    #[serde(default)]
    pub name: String,
    pub x: f32,
    pub y: f32,
    /// Detector confidence. Velocity keypoints reuse this as a validity
    /// sentinel (see `dynamics::VelocityValidity`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,
}

impl Keypoint {
    pub fn new(name: impl Into<String>, x: f32, y: f32, score: Option<f32>) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            score,
        }
    }

    /// Score with absent treated as full confidence
    pub fn confidence(&self) -> f32 {
        self.score.unwrap_or(FULL_CONFIDENCE)
    }
}
