//! Swipe detection - horizontal gesture from a single tracked keypoint
//!
//! Pipeline: extract keypoint -> confidence filter -> 300ms window ->
//! swipe velocity -> classify -> drop repeats -> drop "no swipe" ->
//! 500ms debounce.
//!
//! Every reported gesture is delayed by the debounce quiet period.

use std::fmt;

use serde::Serialize;

use super::{accumulate, extract_keypoints};
use crate::config::GestureConfig;
use crate::pose::{Keypoint, PoseFrame, TimedKeypointSet};
use crate::stream::{Stream, Timers};

/// Classified horizontal motion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SwipeAction {
    #[serde(rename = "swipe -")]
    Negative,
    #[serde(rename = "swipe +")]
    Positive,
    #[serde(rename = "no swipe")]
    NoSwipe,
}

impl SwipeAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            SwipeAction::Negative => "swipe -",
            SwipeAction::Positive => "swipe +",
            SwipeAction::NoSwipe => "no swipe",
        }
    }

    pub fn is_swipe(&self) -> bool {
        *self != SwipeAction::NoSwipe
    }
}

impl fmt::Display for SwipeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gesture notification, stamped at classification time
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GestureEvent {
    pub action: SwipeAction,
    pub t: f64,
}

impl GestureEvent {
    pub fn new(action: SwipeAction, t: f64) -> Self {
        Self { action, t }
    }
}

/// Horizontal slope between the window's extreme samples
///
/// Uses the first keypoint of each sample. `(maxX - minX) / (minT - maxT)`:
/// positive when x decreases over time, matching the velocity convention.
/// `None` with fewer than two samples or when both extremes share a time.
pub fn swipe_velocity(window: &[TimedKeypointSet]) -> Option<f64> {
    if window.len() < 2 {
        return None;
    }

    let mut min = (f32::INFINITY, 0.0);
    let mut max = (f32::NEG_INFINITY, 0.0);
    for sample in window {
        let Some(kp) = sample.keypoints.first() else {
            continue;
        };
        if kp.x < min.0 {
            min = (kp.x, sample.t);
        }
        if kp.x > max.0 {
            max = (kp.x, sample.t);
        }
    }

    let (min_x, min_t) = min;
    let (max_x, max_t) = max;
    if !min_x.is_finite() || !max_x.is_finite() || min_t == max_t {
        return None;
    }
    Some(f64::from(max_x - min_x) / (min_t - max_t))
}

/// Threshold a swipe velocity
pub fn classify(velocity: Option<f64>, threshold: f64) -> SwipeAction {
    match velocity {
        Some(v) if v < -threshold => SwipeAction::Negative,
        Some(v) if v > threshold => SwipeAction::Positive,
        _ => SwipeAction::NoSwipe,
    }
}

/// Debounced, non-repeating swipe events for `config.keypoint`
///
/// Timestamps come from the clock behind `timers`; emissions happen when the
/// owner of `timers` runs them.
pub fn detect_swipe(
    source: &Stream<PoseFrame>,
    config: &GestureConfig,
    timers: &Timers,
) -> Stream<GestureEvent> {
    let clock = timers.clock();
    let min_score = config.min_score;
    let threshold = config.threshold;

    let tracked = extract_keypoints([config.keypoint.as_str()], source, timers.clock());
    let confident = tracked.filter(move |sample| {
        sample.keypoints.first().map_or(0.0, Keypoint::confidence) > min_score
    });

    accumulate(config.window_ms, &confident)
        .map(|window| swipe_velocity(&window))
        .map(move |velocity| GestureEvent::new(classify(velocity, threshold), clock.now_ms()))
        .distinct_until_changed_by(|a, b| a.action == b.action)
        .filter(|event| event.action.is_swipe())
        .debounce(config.debounce_ms, timers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn track(points: &[(f64, f32)]) -> Vec<TimedKeypointSet> {
        points
            .iter()
            .map(|&(t, x)| {
                TimedKeypointSet::new(t, vec![Keypoint::new("right_wrist", x, 0.0, Some(0.9))])
            })
            .collect()
    }

    #[test]
    fn test_needs_two_samples() {
        assert_eq!(swipe_velocity(&[]), None);
        assert_eq!(swipe_velocity(&track(&[(0.0, 5.0)])), None);
    }

    #[test]
    fn test_leftward_motion_is_positive() {
        let window = track(&[(0.0, 100.0), (100.0, 60.0), (300.0, 0.0)]);
        let v = swipe_velocity(&window).unwrap();
        assert_relative_eq!(v, 100.0 / 300.0, epsilon = 1e-9);
    }

    #[test]
    fn test_rightward_motion_is_negative() {
        let window = track(&[(0.0, 0.0), (300.0, 1000.0)]);
        let v = swipe_velocity(&window).unwrap();
        assert_relative_eq!(v, -1000.0 / 300.0, epsilon = 1e-9);
    }

    #[test]
    fn test_stationary_window_has_no_slope() {
        // Both extremes are the first sample
        assert_eq!(swipe_velocity(&track(&[(0.0, 5.0), (50.0, 5.0), (90.0, 5.0)])), None);
    }

    #[test]
    fn test_coincident_extremes_have_no_slope() {
        assert_eq!(swipe_velocity(&track(&[(10.0, 5.0), (10.0, 9.0)])), None);
    }

    #[test]
    fn test_classify_thresholds() {
        assert_eq!(classify(None, 0.7), SwipeAction::NoSwipe);
        assert_eq!(classify(Some(0.7), 0.7), SwipeAction::NoSwipe);
        assert_eq!(classify(Some(-0.7), 0.7), SwipeAction::NoSwipe);
        assert_eq!(classify(Some(0.71), 0.7), SwipeAction::Positive);
        assert_eq!(classify(Some(-3.3), 0.7), SwipeAction::Negative);
    }

    #[test]
    fn test_action_labels() {
        assert_eq!(SwipeAction::Negative.to_string(), "swipe -");
        let json = serde_json::to_string(&GestureEvent::new(SwipeAction::Positive, 12.0)).unwrap();
        assert_eq!(json, r#"{"action":"swipe +","t":12.0}"#);
    }
}
