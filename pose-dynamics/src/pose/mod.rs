//! Pose data model - detector output and the timestamped keypoint sets
//! that flow through the dynamics pipelines.
//!
//! Re-exports only. All logic in submodules.

mod frame;
mod keypoint;
mod source;

pub use frame::{Pose, PoseFrame, TimedKeypointSet};
pub use keypoint::{Keypoint, FULL_CONFIDENCE};
pub use source::PoseSource;
