//! Inference timing statistics
//!
//! The producer brackets each detector call with `begin` / `end`. Timings
//! are summed and flushed as an average once per reporting period.

use serde::Serialize;

/// Reporting period (ms)
pub const DEFAULT_REPORT_PERIOD_MS: f64 = 1000.0;

/// Average inference cost over one reporting period
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InferenceReport {
    pub average_ms: f64,
    /// Inferences per second the average cost would allow
    pub fps: f64,
    pub samples: u32,
}

/// Running inference timer
#[derive(Debug, Clone)]
pub struct InferenceStats {
    period_ms: f64,
    started_at: Option<f64>,
    sum_ms: f64,
    count: u32,
    last_flush: f64,
    last_report: Option<InferenceReport>,
}

impl InferenceStats {
    pub fn new(period_ms: f64) -> Self {
        Self {
            period_ms,
            started_at: None,
            sum_ms: 0.0,
            count: 0,
            last_flush: 0.0,
            last_report: None,
        }
    }

    /// Mark the start of a detector call
    pub fn begin(&mut self, now_ms: f64) {
        self.started_at = Some(now_ms);
    }

    /// Mark the end of a detector call
    ///
    /// Returns a fresh report when the period has elapsed since the last one.
    /// An `end` without a matching `begin` is ignored.
    pub fn end(&mut self, now_ms: f64) -> Option<InferenceReport> {
        let started = self.started_at.take()?;
        self.sum_ms += (now_ms - started).max(0.0);
        self.count += 1;

        if now_ms - self.last_flush < self.period_ms {
            return None;
        }

        let average_ms = self.sum_ms / f64::from(self.count);
        let report = InferenceReport {
            average_ms,
            fps: if average_ms > 0.0 { 1000.0 / average_ms } else { 0.0 },
            samples: self.count,
        };
        log::debug!(
            "inference: {:.2} ms avg over {} calls ({:.1} fps)",
            report.average_ms,
            report.samples,
            report.fps
        );

        self.sum_ms = 0.0;
        self.count = 0;
        self.last_flush = now_ms;
        self.last_report = Some(report);
        Some(report)
    }

    /// Most recent flushed report
    pub fn last_report(&self) -> Option<InferenceReport> {
        self.last_report
    }
}

impl Default for InferenceStats {
    fn default() -> Self {
        Self::new(DEFAULT_REPORT_PERIOD_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_flushes_once_per_period() {
        let mut stats = InferenceStats::new(1000.0);
        // First call is past the initial flush time
        stats.begin(1000.0);
        let first = stats.end(1020.0).unwrap();
        assert_eq!(first.samples, 1);
        assert_relative_eq!(first.average_ms, 20.0);

        stats.begin(1100.0);
        assert!(stats.end(1110.0).is_none());
        stats.begin(1200.0);
        assert!(stats.end(1230.0).is_none());
        stats.begin(2000.0);
        let report = stats.end(2020.0).unwrap();

        assert_eq!(report.samples, 3);
        assert_relative_eq!(report.average_ms, 20.0);
        assert_relative_eq!(report.fps, 50.0);
        assert_eq!(stats.last_report(), Some(report));
    }

    #[test]
    fn test_end_without_begin_is_ignored() {
        let mut stats = InferenceStats::default();
        assert!(stats.end(5000.0).is_none());
        assert!(stats.last_report().is_none());
    }
}
