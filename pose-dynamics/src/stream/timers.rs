//! Cancellable deferred callbacks on a `Clock`
//!
//! The queue never fires on its own: whoever drives the event loop calls
//! `run_due` (the JS bridge does it on every animation frame tick).

use std::cell::RefCell;
use std::rc::Rc;

use super::Clock;

/// Handle for cancelling a scheduled callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

struct Entry {
    id: TimerId,
    due_ms: f64,
    callback: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct TimerQueue {
    next_id: u64,
    entries: Vec<Entry>,
}

impl TimerQueue {
    /// Remove the earliest entry due at `now_ms` (ties: scheduling order)
    fn pop_due(&mut self, now_ms: f64) -> Option<Entry> {
        let index = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.due_ms <= now_ms)
            .min_by(|(_, a), (_, b)| a.due_ms.total_cmp(&b.due_ms).then(a.id.0.cmp(&b.id.0)))
            .map(|(index, _)| index)?;
        Some(self.entries.remove(index))
    }
}

/// Timer queue bound to a clock. Clones share the same queue.
#[derive(Clone)]
pub struct Timers {
    clock: Rc<dyn Clock>,
    queue: Rc<RefCell<TimerQueue>>,
}

impl Timers {
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        Self {
            clock,
            queue: Rc::new(RefCell::new(TimerQueue::default())),
        }
    }

    pub fn clock(&self) -> Rc<dyn Clock> {
        Rc::clone(&self.clock)
    }

    pub fn now_ms(&self) -> f64 {
        self.clock.now_ms()
    }

    /// Run `callback` once the clock reaches `due_ms`
    pub fn schedule_at<F>(&self, due_ms: f64, callback: F) -> TimerId
    where
        F: FnOnce() + 'static,
    {
        let mut queue = self.queue.borrow_mut();
        let id = TimerId(queue.next_id);
        queue.next_id += 1;
        queue.entries.push(Entry {
            id,
            due_ms,
            callback: Box::new(callback),
        });
        id
    }

    /// Run `callback` `delay_ms` from now
    pub fn schedule_in<F>(&self, delay_ms: f64, callback: F) -> TimerId
    where
        F: FnOnce() + 'static,
    {
        self.schedule_at(self.clock.now_ms() + delay_ms, callback)
    }

    /// Returns false if the timer already fired or was cancelled
    pub fn cancel(&self, id: TimerId) -> bool {
        let mut queue = self.queue.borrow_mut();
        let before = queue.entries.len();
        queue.entries.retain(|entry| entry.id != id);
        queue.entries.len() != before
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().entries.len()
    }

    /// Earliest due time among pending timers
    pub fn next_due(&self) -> Option<f64> {
        self.queue
            .borrow()
            .entries
            .iter()
            .map(|entry| entry.due_ms)
            .min_by(|a, b| a.total_cmp(b))
    }

    /// Fire every timer due at the current clock time, returning how many ran
    pub fn run_due(&self) -> usize {
        let now = self.clock.now_ms();
        let mut fired = 0;
        loop {
            // Release the borrow before the callback: it may schedule or cancel
            let entry = self.queue.borrow_mut().pop_due(now);
            match entry {
                Some(entry) => {
                    (entry.callback)();
                    fired += 1;
                }
                None => break,
            }
        }
        fired
    }
}

impl std::fmt::Debug for Timers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Timers")
            .field("pending", &self.pending())
            .field("next_due", &self.next_due())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::ManualClock;

    fn timers_at(start: f64) -> (ManualClock, Timers) {
        let clock = ManualClock::new(start);
        let timers = Timers::new(Rc::new(clock.clone()));
        (clock, timers)
    }

    #[test]
    fn test_fires_only_when_due() {
        let (clock, timers) = timers_at(0.0);
        let fired = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&fired);
        timers.schedule_in(500.0, move || sink.borrow_mut().push("a"));

        clock.set(499.0);
        assert_eq!(timers.run_due(), 0);
        clock.set(500.0);
        assert_eq!(timers.run_due(), 1);
        assert_eq!(*fired.borrow(), vec!["a"]);
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn test_due_order_then_schedule_order() {
        let (clock, timers) = timers_at(0.0);
        let fired = Rc::new(RefCell::new(Vec::new()));
        for (due, label) in [(30.0, "late"), (10.0, "first"), (10.0, "second")] {
            let sink = Rc::clone(&fired);
            timers.schedule_at(due, move || sink.borrow_mut().push(label));
        }
        assert_eq!(timers.next_due(), Some(10.0));

        clock.set(100.0);
        assert_eq!(timers.run_due(), 3);
        assert_eq!(*fired.borrow(), vec!["first", "second", "late"]);
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let (clock, timers) = timers_at(0.0);
        let fired = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&fired);
        let id = timers.schedule_in(10.0, move || *sink.borrow_mut() += 1);

        assert!(timers.cancel(id));
        assert!(!timers.cancel(id));
        clock.set(50.0);
        assert_eq!(timers.run_due(), 0);
        assert_eq!(*fired.borrow(), 0);
    }

    #[test]
    fn test_callback_may_schedule_more_work() {
        let (clock, timers) = timers_at(0.0);
        let fired = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&fired);
        let inner = timers.clone();
        timers.schedule_in(10.0, move || {
            let sink = Rc::clone(&sink);
            inner.schedule_in(0.0, move || *sink.borrow_mut() += 1);
        });

        clock.set(10.0);
        assert_eq!(timers.run_due(), 2);
        assert_eq!(*fired.borrow(), 1);
    }
}
