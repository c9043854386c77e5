//! Keypoint extraction - project a detector frame onto named keypoints
//!
//! Only the first detected body is used. Keypoints keep the detector's
//! order, which is what downstream windows and graphs rely on.

use std::collections::HashSet;
use std::rc::Rc;

use crate::pose::{PoseFrame, TimedKeypointSet};
use crate::stream::{Clock, Stream};

/// Projects frames onto a fixed set of keypoint names
#[derive(Debug, Clone)]
pub struct KeypointExtractor {
    names: HashSet<String>,
}

impl KeypointExtractor {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn tracks(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Keypoints of the first body whose name is tracked, stamped with `t`
    ///
    /// No body in the frame gives an empty set.
    pub fn project(&self, frame: &PoseFrame, t: f64) -> TimedKeypointSet {
        let keypoints = frame
            .primary()
            .map(|pose| {
                pose.keypoints
                    .iter()
                    .filter(|kp| self.tracks(&kp.name))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        TimedKeypointSet::new(t, keypoints)
    }
}

/// Stream of extracted keypoint sets, each stamped when it is processed
pub fn extract_keypoints<I, S>(
    names: I,
    source: &Stream<PoseFrame>,
    clock: Rc<dyn Clock>,
) -> Stream<TimedKeypointSet>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let extractor = KeypointExtractor::new(names);
    source.map(move |frame| extractor.project(&frame, clock.now_ms()))
}
