//! Pipeline configuration
//!
//! Built once by the host (defaults, or deserialized from a JS object) and
//! handed by reference to the pipeline builders. Nothing in the crate looks
//! configuration up on its own.

use serde::{Deserialize, Serialize};

use crate::error::{DynamicsError, Result};

/// Keypoint tracked by the swipe detector
pub const DEFAULT_GESTURE_KEYPOINT: &str = "right_wrist";

/// Samples at or below this confidence are dropped before windowing
pub const DEFAULT_MIN_SCORE: f32 = 0.5;

/// Swipe accumulation window (ms)
pub const DEFAULT_GESTURE_WINDOW_MS: f64 = 300.0;

/// Swipe velocity magnitude that counts as a gesture
pub const DEFAULT_SWIPE_THRESHOLD: f64 = 0.70;

/// Quiet period before a gesture is reported (ms)
pub const DEFAULT_DEBOUNCE_MS: f64 = 500.0;

/// Window over which velocity endpoints are taken (ms)
pub const DEFAULT_VELOCITY_WINDOW_MS: f64 = 200.0;

/// How much velocity history is kept for graphing (ms)
pub const DEFAULT_HISTORY_MS: f64 = 3000.0;

/// Swipe detector settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GestureConfig {
    pub keypoint: String,
    pub min_score: f32,
    pub window_ms: f64,
    pub threshold: f64,
    pub debounce_ms: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            keypoint: DEFAULT_GESTURE_KEYPOINT.to_string(),
            min_score: DEFAULT_MIN_SCORE,
            window_ms: DEFAULT_GESTURE_WINDOW_MS,
            threshold: DEFAULT_SWIPE_THRESHOLD,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

/// Trajectory / velocity graph settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrajectoryConfig {
    /// Keypoints to extract, in the order the detector reports them
    pub keypoints: Vec<String>,
    pub window_ms: f64,
    pub history_ms: f64,
}

impl Default for TrajectoryConfig {
    fn default() -> Self {
        Self {
            keypoints: vec!["left_wrist".to_string(), "right_wrist".to_string()],
            window_ms: DEFAULT_VELOCITY_WINDOW_MS,
            history_ms: DEFAULT_HISTORY_MS,
        }
    }
}

/// Top-level configuration owned by the application assembly
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DynamicsConfig {
    pub gesture: GestureConfig,
    pub trajectory: TrajectoryConfig,
}

impl DynamicsConfig {
    /// Check every value the pipelines depend on
    pub fn validate(&self) -> Result<()> {
        let gesture = &self.gesture;
        if gesture.keypoint.trim().is_empty() {
            return Err(DynamicsError::invalid_config(
                "gesture.keypoint",
                "must name a keypoint",
            ));
        }
        if !(0.0..=1.0).contains(&gesture.min_score) {
            return Err(DynamicsError::invalid_config(
                "gesture.minScore",
                format!("must be within [0, 1], got {}", gesture.min_score),
            ));
        }
        positive("gesture.windowMs", gesture.window_ms)?;
        positive("gesture.threshold", gesture.threshold)?;
        positive("gesture.debounceMs", gesture.debounce_ms)?;

        let trajectory = &self.trajectory;
        if trajectory.keypoints.is_empty() {
            return Err(DynamicsError::invalid_config(
                "trajectory.keypoints",
                "must list at least one keypoint",
            ));
        }
        if trajectory.keypoints.iter().any(|name| name.trim().is_empty()) {
            return Err(DynamicsError::invalid_config(
                "trajectory.keypoints",
                "contains an empty name",
            ));
        }
        positive("trajectory.windowMs", trajectory.window_ms)?;
        positive("trajectory.historyMs", trajectory.history_ms)?;

        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(DynamicsError::invalid_config(
            field,
            format!("must be a positive number, got {}", value),
        ))
    }
}
