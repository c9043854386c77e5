//! Time sources (milliseconds)

use std::cell::Cell;
use std::rc::Rc;

/// Millisecond time source used for sample timestamps and timers
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Wall clock (`Date.now()` in the browser via chrono's wasmbind support)
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        chrono::Utc::now().timestamp_micros() as f64 / 1000.0
    }
}

/// Settable clock shared between clones
///
/// Used for deterministic replay and tests: every clone observes the same
/// time.
#[derive(Debug, Default, Clone)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    pub fn set(&self, now_ms: f64) {
        self.now.set(now_ms);
    }

    pub fn advance(&self, delta_ms: f64) {
        self.now.set(self.now.get() + delta_ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_shared_between_clones() {
        let clock = ManualClock::new(10.0);
        let view = clock.clone();
        clock.advance(5.0);
        assert_eq!(view.now_ms(), 15.0);
        view.set(100.0);
        assert_eq!(clock.now_ms(), 100.0);
    }

    #[test]
    fn test_system_clock_moves_forward() {
        let clock = SystemClock;
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(a > 0.0);
        assert!(b >= a);
    }
}
