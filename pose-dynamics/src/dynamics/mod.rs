//! Dynamics module - keypoint extraction, time windows, velocity and
//! swipe detection built as stream transforms
//!
//! Re-exports only. All logic in submodules.

mod accumulator;
mod extractor;
mod graph;
mod swipe;
mod trajectory;
mod velocity;

pub use accumulator::{accumulate, WindowAccumulator};
pub use extractor::{extract_keypoints, KeypointExtractor};
pub use graph::{graph_points, Axis, GraphBounds, GraphPoint};
pub use swipe::{classify, detect_swipe, swipe_velocity, GestureEvent, SwipeAction};
pub use trajectory::{trajectory_streams, TrajectoryStreams};
pub use velocity::{
    velocity, window_velocity, VelocityValidity, INVALID_SCORE, MIN_ENDPOINT_SCORE,
    SINGLE_SAMPLE_SCORE,
};
