//! Sliding time window over keypoint samples
//!
//! Unlike a fixed-size ring, the window is re-filtered on every arrival:
//! whatever is older than `window_ms` behind the newest time seen is
//! dropped. Only time eviction bounds the buffer.

use crate::pose::TimedKeypointSet;
use crate::stream::Stream;

/// Time-window buffer of keypoint samples
#[derive(Debug, Clone)]
pub struct WindowAccumulator {
    window_ms: f64,
    /// Running maximum of sample times (clamps out-of-order stamps)
    latest: f64,
    buffer: Vec<TimedKeypointSet>,
}

impl WindowAccumulator {
    pub fn new(window_ms: f64) -> Self {
        Self {
            window_ms,
            latest: f64::NEG_INFINITY,
            buffer: Vec::new(),
        }
    }

    /// Add a sample and return the window contents
    pub fn push(&mut self, sample: TimedKeypointSet) -> &[TimedKeypointSet] {
        let now = sample.t.max(self.latest);
        self.latest = now;
        let min_time = now - self.window_ms;

        self.buffer.push(sample);
        self.buffer.retain(|s| s.t >= min_time);
        &self.buffer
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Newest time seen so far
    pub fn latest(&self) -> Option<f64> {
        self.latest.is_finite().then_some(self.latest)
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.latest = f64::NEG_INFINITY;
    }
}

/// Emit the current window on every sample
///
/// Each subscriber gets its own buffer and its own copy of the contents.
pub fn accumulate(
    window_ms: f64,
    source: &Stream<TimedKeypointSet>,
) -> Stream<Vec<TimedKeypointSet>> {
    source.scan(WindowAccumulator::new(window_ms), |acc, sample| {
        acc.push(sample).to_vec()
    })
}
