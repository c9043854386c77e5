//! Subscription handle - detaches an observer when dropped

/// Teardown guard returned by `Stream::subscribe`
///
/// Dropping it (or calling `unsubscribe`) detaches the observer and releases
/// operator resources such as pending timers. The producer keeps running.
#[must_use = "dropping a Subscription detaches the observer immediately"]
pub struct Subscription {
    teardown: Vec<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new<F>(teardown: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        Self {
            teardown: vec![Box::new(teardown)],
        }
    }

    /// Tie another subscription's teardown to this one
    pub fn add(&mut self, mut other: Subscription) {
        self.teardown.append(&mut other.teardown);
    }

    pub fn is_closed(&self) -> bool {
        self.teardown.is_empty()
    }

    pub fn unsubscribe(mut self) {
        self.close();
    }

    fn close(&mut self) {
        // Innermost resources were registered last
        while let Some(teardown) = self.teardown.pop() {
            teardown();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("closed", &self.is_closed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_teardown_runs_once_in_reverse_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let (a, b) = (Rc::clone(&log), Rc::clone(&log));

        let mut sub = Subscription::new(move || a.borrow_mut().push("outer"));
        sub.add(Subscription::new(move || b.borrow_mut().push("inner")));
        assert!(!sub.is_closed());

        sub.unsubscribe();
        assert_eq!(*log.borrow(), vec!["inner", "outer"]);
    }

    #[test]
    fn test_drop_runs_teardown() {
        let hit = Rc::new(RefCell::new(false));
        let flag = Rc::clone(&hit);
        {
            let _sub = Subscription::new(move || *flag.borrow_mut() = true);
        }
        assert!(*hit.borrow());
    }
}
