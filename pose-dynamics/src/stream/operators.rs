//! Stream operators: map, filter, scan, distinct_until_changed, debounce
//!
//! Every operator runs synchronously on the thread that pushed the value,
//! except `debounce`, which defers emission to a `Timers` queue.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::{Sink, Stream, Subscription, TimerId, Timers};

impl<T: 'static> Stream<T> {
    /// Transform each value
    pub fn map<U, F>(&self, f: F) -> Stream<U>
    where
        U: 'static,
        F: Fn(T) -> U + 'static,
    {
        let upstream = self.clone();
        let f = Rc::new(f);
        Stream::new(move |mut sink: Sink<U>| {
            let f = Rc::clone(&f);
            upstream.subscribe(move |value| sink(f(value)))
        })
    }

    /// Keep values matching `predicate`
    pub fn filter<F>(&self, predicate: F) -> Stream<T>
    where
        F: Fn(&T) -> bool + 'static,
    {
        let upstream = self.clone();
        let predicate = Rc::new(predicate);
        Stream::new(move |mut sink: Sink<T>| {
            let predicate = Rc::clone(&predicate);
            upstream.subscribe(move |value| {
                if predicate(&value) {
                    sink(value);
                }
            })
        })
    }

    /// Stateful fold emitting one output per input
    ///
    /// Each subscription starts from its own copy of `seed`.
    pub fn scan<S, U, F>(&self, seed: S, f: F) -> Stream<U>
    where
        S: Clone + 'static,
        U: 'static,
        F: Fn(&mut S, T) -> U + 'static,
    {
        let upstream = self.clone();
        let f = Rc::new(f);
        Stream::new(move |mut sink: Sink<U>| {
            let f = Rc::clone(&f);
            let mut state = seed.clone();
            upstream.subscribe(move |value| {
                let out = f(&mut state, value);
                sink(out);
            })
        })
    }

    /// Suppress values `eq` to the previously emitted one
    pub fn distinct_until_changed_by<F>(&self, eq: F) -> Stream<T>
    where
        T: Clone,
        F: Fn(&T, &T) -> bool + 'static,
    {
        let upstream = self.clone();
        let eq = Rc::new(eq);
        Stream::new(move |mut sink: Sink<T>| {
            let eq = Rc::clone(&eq);
            let mut last: Option<T> = None;
            upstream.subscribe(move |value| {
                if let Some(prev) = &last {
                    if eq(prev, &value) {
                        return;
                    }
                }
                last = Some(value.clone());
                sink(value);
            })
        })
    }

    pub fn distinct_until_changed(&self) -> Stream<T>
    where
        T: Clone + PartialEq,
    {
        self.distinct_until_changed_by(|a, b| a == b)
    }

    /// Emit the last value of a burst once `delay_ms` passes without another
    ///
    /// Each value cancels the pending emission and schedules a new one on
    /// `timers`. Unsubscribing cancels whatever is pending.
    pub fn debounce(&self, delay_ms: f64, timers: &Timers) -> Stream<T> {
        let upstream = self.clone();
        let timers = timers.clone();
        Stream::new(move |sink: Sink<T>| {
            let sink = Rc::new(RefCell::new(sink));
            let pending: Rc<Cell<Option<TimerId>>> = Rc::new(Cell::new(None));

            let on_value = {
                let timers = timers.clone();
                let pending = Rc::clone(&pending);
                move |value: T| {
                    if let Some(id) = pending.take() {
                        timers.cancel(id);
                    }
                    let sink = Rc::clone(&sink);
                    let fired = Rc::clone(&pending);
                    let id = timers.schedule_in(delay_ms, move || {
                        fired.set(None);
                        let mut emit = sink.borrow_mut();
                        (*emit)(value);
                    });
                    pending.set(Some(id));
                }
            };

            let mut subscription = upstream.subscribe(on_value);
            let timers = timers.clone();
            subscription.add(Subscription::new(move || {
                if let Some(id) = pending.take() {
                    timers.cancel(id);
                }
            }));
            subscription
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::{ManualClock, Subject};

    fn record<T: 'static>(stream: &Stream<T>) -> (Rc<RefCell<Vec<T>>>, Subscription) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let sub = stream.subscribe(move |v| sink.borrow_mut().push(v));
        (seen, sub)
    }

    #[test]
    fn test_map_filter_chain() {
        let subject: Subject<i32> = Subject::new();
        let stream = subject.stream().map(|v| v * 10).filter(|v| *v > 10);
        let (seen, _sub) = record(&stream);

        for v in 0..4 {
            subject.next(v);
        }
        assert_eq!(*seen.borrow(), vec![20, 30]);
    }

    #[test]
    fn test_scan_state_is_per_subscription() {
        let subject: Subject<i32> = Subject::new();
        let running = subject.stream().scan(0, |total, v| {
            *total += v;
            *total
        });

        let (first, _a) = record(&running);
        subject.next(1);
        subject.next(2);
        let (second, _b) = record(&running);
        subject.next(3);

        assert_eq!(*first.borrow(), vec![1, 3, 6]);
        assert_eq!(*second.borrow(), vec![3]);
    }

    #[test]
    fn test_distinct_until_changed_drops_repeats_only() {
        let subject: Subject<&'static str> = Subject::new();
        let (seen, _sub) = record(&subject.stream().distinct_until_changed());

        for v in ["a", "a", "b", "b", "a"] {
            subject.next(v);
        }
        assert_eq!(*seen.borrow(), vec!["a", "b", "a"]);
    }

    #[test]
    fn test_debounce_keeps_last_of_burst() {
        let clock = ManualClock::new(0.0);
        let timers = Timers::new(Rc::new(clock.clone()));
        let subject: Subject<i32> = Subject::new();
        let (seen, _sub) = record(&subject.stream().debounce(500.0, &timers));

        subject.next(1);
        clock.set(200.0);
        subject.next(2);
        clock.set(699.0);
        timers.run_due();
        assert!(seen.borrow().is_empty());

        clock.set(700.0);
        timers.run_due();
        assert_eq!(*seen.borrow(), vec![2]);
    }

    #[test]
    fn test_debounce_spaced_values_all_emit() {
        let clock = ManualClock::new(0.0);
        let timers = Timers::new(Rc::new(clock.clone()));
        let subject: Subject<i32> = Subject::new();
        let (seen, _sub) = record(&subject.stream().debounce(100.0, &timers));

        subject.next(1);
        clock.set(150.0);
        timers.run_due();
        subject.next(2);
        clock.set(300.0);
        timers.run_due();

        assert_eq!(*seen.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_unsubscribe_cancels_pending_debounce() {
        let clock = ManualClock::new(0.0);
        let timers = Timers::new(Rc::new(clock.clone()));
        let subject: Subject<i32> = Subject::new();
        let (seen, sub) = record(&subject.stream().debounce(100.0, &timers));

        subject.next(7);
        assert_eq!(timers.pending(), 1);
        sub.unsubscribe();
        assert_eq!(timers.pending(), 0);
        assert_eq!(subject.observer_count(), 0);

        clock.set(1000.0);
        timers.run_due();
        assert!(seen.borrow().is_empty());
    }
}
