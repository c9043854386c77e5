//! Hot multicast source

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use super::{Sink, Stream, Subscription};

type SharedSink<T> = Rc<RefCell<Sink<T>>>;

struct Observers<T> {
    next_id: u64,
    sinks: Vec<(u64, SharedSink<T>)>,
}

/// Values waiting behind the one currently being delivered
struct Delivery<T> {
    pending: RefCell<VecDeque<T>>,
    delivering: Cell<bool>,
}

/// Fan-out source: `next` delivers to every current subscriber in
/// subscription order. Late subscribers only see later values.
pub struct Subject<T> {
    observers: Rc<RefCell<Observers<T>>>,
    delivery: Rc<Delivery<T>>,
}

impl<T> Clone for Subject<T> {
    fn clone(&self) -> Self {
        Self {
            observers: Rc::clone(&self.observers),
            delivery: Rc::clone(&self.delivery),
        }
    }
}

impl<T> Default for Subject<T> {
    fn default() -> Self {
        Self {
            observers: Rc::new(RefCell::new(Observers {
                next_id: 0,
                sinks: Vec::new(),
            })),
            delivery: Rc::new(Delivery {
                pending: RefCell::new(VecDeque::new()),
                delivering: Cell::new(false),
            }),
        }
    }
}

impl<T: Clone + 'static> Subject<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a value to all subscribers
    ///
    /// A value pushed from inside a subscriber callback is queued and
    /// delivered once the current value has reached every subscriber, so
    /// arrival order holds across nested pushes.
    pub fn next(&self, value: T) {
        self.delivery.pending.borrow_mut().push_back(value);
        if self.delivery.delivering.replace(true) {
            return;
        }
        loop {
            let queued = self.delivery.pending.borrow_mut().pop_front();
            match queued {
                Some(value) => self.deliver(value),
                None => break,
            }
        }
        self.delivery.delivering.set(false);
    }

    fn deliver(&self, value: T) {
        // Snapshot so observers may subscribe/unsubscribe while we deliver
        let sinks: Vec<SharedSink<T>> = self
            .observers
            .borrow()
            .sinks
            .iter()
            .map(|(_, sink)| Rc::clone(sink))
            .collect();

        for sink in sinks {
            let mut emit = sink.borrow_mut();
            (*emit)(value.clone());
        }
    }

    pub fn observer_count(&self) -> usize {
        self.observers.borrow().sinks.len()
    }

    pub fn stream(&self) -> Stream<T> {
        let observers = Rc::clone(&self.observers);
        Stream::new(move |sink: Sink<T>| {
            let id = {
                let mut observers = observers.borrow_mut();
                let id = observers.next_id;
                observers.next_id += 1;
                observers.sinks.push((id, Rc::new(RefCell::new(sink))));
                id
            };

            let weak = Rc::downgrade(&observers);
            Subscription::new(move || {
                if let Some(observers) = weak.upgrade() {
                    observers.borrow_mut().sinks.retain(|(sid, _)| *sid != id);
                }
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect<T: Clone + 'static>(stream: &Stream<T>) -> (Rc<RefCell<Vec<T>>>, Subscription) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let sub = stream.subscribe(move |v| sink.borrow_mut().push(v));
        (seen, sub)
    }

    #[test]
    fn test_fans_out_in_order() {
        let subject: Subject<i32> = Subject::new();
        let (a, _sa) = collect(&subject.stream());
        let (b, _sb) = collect(&subject.stream());

        subject.next(1);
        subject.next(2);

        assert_eq!(*a.borrow(), vec![1, 2]);
        assert_eq!(*b.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_nested_next_is_queued_behind_current_value() {
        let subject: Subject<i32> = Subject::new();
        let inner = subject.clone();
        let a = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&a);
        let _sa = subject.stream().subscribe(move |v: i32| {
            sink.borrow_mut().push(v);
            if v == 1 {
                inner.next(2);
                inner.next(3);
            }
        });
        let (b, _sb) = collect(&subject.stream());

        subject.next(1);
        subject.next(4);

        assert_eq!(*a.borrow(), vec![1, 2, 3, 4]);
        assert_eq!(*b.borrow(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_late_subscriber_misses_earlier_values() {
        let subject: Subject<i32> = Subject::new();
        subject.next(1);
        let (seen, _sub) = collect(&subject.stream());
        subject.next(2);
        assert_eq!(*seen.borrow(), vec![2]);
    }

    #[test]
    fn test_unsubscribe_detaches_only_that_observer() {
        let subject: Subject<&'static str> = Subject::new();
        let (a, sa) = collect(&subject.stream());
        let (b, _sb) = collect(&subject.stream());
        assert_eq!(subject.observer_count(), 2);

        subject.next("x");
        drop(sa);
        subject.next("y");

        assert_eq!(*a.borrow(), vec!["x"]);
        assert_eq!(*b.borrow(), vec!["x", "y"]);
        assert_eq!(subject.observer_count(), 1);
    }
}
