//! `Stream<T>` - a subscribable recipe for a chain of stages

use std::rc::Rc;

use super::Subscription;

/// Downstream end of a stage
pub type Sink<T> = Box<dyn FnMut(T)>;

/// Push stream of `T`
///
/// Cloning is cheap and shares the recipe, not any state: each subscription
/// runs its own copy of every stateful operator.
pub struct Stream<T> {
    connect: Rc<dyn Fn(Sink<T>) -> Subscription>,
}

impl<T> Clone for Stream<T> {
    fn clone(&self) -> Self {
        Self {
            connect: Rc::clone(&self.connect),
        }
    }
}

impl<T: 'static> Stream<T> {
    /// Build a stream from a connect function that wires a sink to a producer
    pub fn new<F>(connect: F) -> Self
    where
        F: Fn(Sink<T>) -> Subscription + 'static,
    {
        Self {
            connect: Rc::new(connect),
        }
    }

    /// Attach an observer. Values flow until the subscription is dropped.
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: FnMut(T) + 'static,
    {
        (self.connect)(Box::new(observer))
    }
}
