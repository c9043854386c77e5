//! Inbound pose stream
//!
//! The producer (the host's inference loop) pushes one frame per inference.
//! A rejected inference is logged and skipped; it never becomes a value in
//! the stream.

use std::cell::Cell;
use std::fmt::Display;

use super::PoseFrame;
use crate::stream::{Stream, Subject};

/// Hot source of pose frames, shared by every pipeline built on it
#[derive(Default)]
pub struct PoseSource {
    subject: Subject<PoseFrame>,
    delivered: Cell<u64>,
    rejected: Cell<u64>,
}

impl PoseSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stream view for building pipelines
    pub fn stream(&self) -> Stream<PoseFrame> {
        self.subject.stream()
    }

    /// Deliver one inference result to every subscribed pipeline
    pub fn push(&self, frame: PoseFrame) {
        self.delivered.set(self.delivered.get() + 1);
        if frame.poses.is_empty() {
            log::trace!("frame {} carried no detection", self.delivered.get());
        }
        self.subject.next(frame);
    }

    /// Deliver the outcome of an inference call. Failures emit nothing.
    pub fn push_result<E: Display>(&self, result: Result<PoseFrame, E>) {
        match result {
            Ok(frame) => self.push(frame),
            Err(err) => {
                self.rejected.set(self.rejected.get() + 1);
                log::warn!("skipping rejected inference: {}", err);
            }
        }
    }

    pub fn delivered(&self) -> u64 {
        self.delivered.get()
    }

    pub fn rejected(&self) -> u64 {
        self.rejected.get()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subject.observer_count()
    }
}
