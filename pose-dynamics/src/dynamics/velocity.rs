//! Finite-difference velocity between the endpoints of a window
//!
//! Velocity is `(first - last) / dt` in detector units per millisecond, so
//! it is positive when a keypoint moves toward smaller coordinates. The swipe
//! detector uses the same convention.
//!
//! The score field of an output keypoint is a validity sentinel:
//! - absent: velocity is valid
//! - `INVALID_SCORE` (-1): an endpoint was missing or unconfident, or the
//!   endpoints share a timestamp
//! - `SINGLE_SAMPLE_SCORE` (-2): the window held a single sample

use std::rc::Rc;

use crate::pose::{Keypoint, TimedKeypointSet};
use crate::stream::{Clock, Stream};

/// Endpoints scoring below this give an invalid velocity
pub const MIN_ENDPOINT_SCORE: f32 = 0.5;

/// Sentinel score for an invalid velocity
pub const INVALID_SCORE: f32 = -1.0;

/// Sentinel score for a single-sample window
pub const SINGLE_SAMPLE_SCORE: f32 = -2.0;

/// Meaning of a velocity keypoint's score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VelocityValidity {
    Valid,
    Invalid,
    SingleSample,
}

impl VelocityValidity {
    pub fn of(keypoint: &Keypoint) -> Self {
        match keypoint.score {
            Some(score) if score == SINGLE_SAMPLE_SCORE => VelocityValidity::SingleSample,
            Some(score) if score == INVALID_SCORE => VelocityValidity::Invalid,
            _ => VelocityValidity::Valid,
        }
    }

    pub fn is_valid(&self) -> bool {
        *self == VelocityValidity::Valid
    }
}

fn sentinel(name: &str, score: f32) -> Keypoint {
    Keypoint::new(name, 0.0, 0.0, Some(score))
}

fn confident(keypoint: &Keypoint) -> bool {
    keypoint.score.map_or(false, |score| score >= MIN_ENDPOINT_SCORE)
}

/// Velocity of every keypoint in the window's first sample
///
/// Endpoints are matched by keypoint name, not position. `now` stamps the
/// result for an empty window.
pub fn window_velocity(window: &[TimedKeypointSet], now: f64) -> TimedKeypointSet {
    match window {
        [] => TimedKeypointSet::new(now, Vec::new()),
        [only] => TimedKeypointSet::new(
            only.t,
            only.keypoints
                .iter()
                .map(|kp| sentinel(&kp.name, SINGLE_SAMPLE_SCORE))
                .collect(),
        ),
        [first, .., last] => {
            let dt = last.t - first.t;
            let keypoints = first
                .keypoints
                .iter()
                .map(|start| {
                    let end = match last.get(&start.name) {
                        Some(end) if confident(start) && confident(end) => end,
                        _ => return sentinel(&start.name, INVALID_SCORE),
                    };
                    let vx = f64::from(start.x - end.x) / dt;
                    let vy = f64::from(start.y - end.y) / dt;
                    // Coincident endpoints (dt == 0) land here too
                    if !vx.is_finite() || !vy.is_finite() {
                        return sentinel(&start.name, INVALID_SCORE);
                    }
                    Keypoint::new(start.name.clone(), vx as f32, vy as f32, None)
                })
                .collect();
            TimedKeypointSet::new(last.t, keypoints)
        }
    }
}

/// Map each window to its endpoint velocity
pub fn velocity(
    source: &Stream<Vec<TimedKeypointSet>>,
    clock: Rc<dyn Clock>,
) -> Stream<TimedKeypointSet> {
    source.map(move |window| window_velocity(&window, clock.now_ms()))
}
