//! Trajectory pipeline - sample windows, velocities and velocity history
//! for graphing
//!
//! extract -> accumulate(window) -> velocity -> accumulate(history)

use std::rc::Rc;

use super::{accumulate, extract_keypoints, velocity};
use crate::config::TrajectoryConfig;
use crate::pose::{PoseFrame, TimedKeypointSet};
use crate::stream::{Clock, Stream};

/// Outbound streams of the trajectory pipeline
///
/// Each is an independent recipe: subscribing to two of them runs two
/// pipelines with separate buffers.
#[derive(Clone)]
pub struct TrajectoryStreams {
    /// Raw sample windows (debug view)
    pub windows: Stream<Vec<TimedKeypointSet>>,
    /// One velocity set per sample
    pub velocities: Stream<TimedKeypointSet>,
    /// Recent velocity sets, for graphing
    pub history: Stream<Vec<TimedKeypointSet>>,
}

pub fn trajectory_streams(
    source: &Stream<PoseFrame>,
    config: &TrajectoryConfig,
    clock: Rc<dyn Clock>,
) -> TrajectoryStreams {
    let extracted = extract_keypoints(config.keypoints.iter().cloned(), source, Rc::clone(&clock));
    let windows = accumulate(config.window_ms, &extracted);
    let velocities = velocity(&windows, clock);
    let history = accumulate(config.history_ms, &velocities);

    TrajectoryStreams {
        windows,
        velocities,
        history,
    }
}
