//! Observer registry used by the form adapter.

/// Handle returned by [`Subscribers::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

type Callback<T> = Box<dyn FnMut(&T)>;

/// Ordered set of callbacks notified with each new value.
pub struct Subscribers<T> {
    next_id: u64,
    callbacks: Vec<(Subscription, Callback<T>)>,
}

impl<T> Default for Subscribers<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for Subscribers<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscribers")
            .field("count", &self.callbacks.len())
            .finish()
    }
}

impl<T> Subscribers<T> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            callbacks: Vec::new(),
        }
    }

    pub fn subscribe<F>(&mut self, callback: F) -> Subscription
    where
        F: FnMut(&T) + 'static,
    {
        let id = Subscription(self.next_id);
        self.next_id += 1;
        self.callbacks.push((id, Box::new(callback)));
        id
    }

    /// Removes a callback. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(id, _)| *id != subscription);
        self.callbacks.len() != before
    }

    /// Calls every callback in subscription order.
    pub fn notify(&mut self, value: &T) {
        for (_, callback) in self.callbacks.iter_mut() {
            callback(value);
        }
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    /// Drops every callback, returning how many there were.
    pub fn clear(&mut self) -> usize {
        let count = self.callbacks.len();
        self.callbacks.clear();
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_notify_in_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut subs = Subscribers::new();
        for tag in ["a", "b"] {
            let seen = Rc::clone(&seen);
            subs.subscribe(move |v: &u32| seen.borrow_mut().push(format!("{tag}{v}")));
        }
        subs.notify(&7);
        assert_eq!(*seen.borrow(), vec!["a7", "b7"]);
    }

    #[test]
    fn test_unsubscribe() {
        let hits = Rc::new(RefCell::new(0));
        let mut subs = Subscribers::new();
        let id = {
            let hits = Rc::clone(&hits);
            subs.subscribe(move |_: &()| *hits.borrow_mut() += 1)
        };
        subs.notify(&());
        assert!(subs.unsubscribe(id));
        assert!(!subs.unsubscribe(id));
        subs.notify(&());
        assert_eq!(*hits.borrow(), 1);
        assert!(subs.is_empty());
    }

    #[test]
    fn test_clear_counts() {
        let mut subs: Subscribers<u8> = Subscribers::new();
        subs.subscribe(|_| {});
        subs.subscribe(|_| {});
        assert_eq!(subs.len(), 2);
        assert_eq!(subs.clear(), 2);
        assert_eq!(subs.clear(), 0);
    }
}
