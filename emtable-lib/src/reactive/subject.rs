//! Event source without replay

use std::sync::Arc;

use super::Item;
use super::Listener;
use super::Stream;
use super::listeners::Listeners;

/// Multicast event source.
///
/// Unlike [`State`](super::State) a subject keeps no value: subscribers only
/// see events emitted after they subscribed.
pub struct Subject<T> {
    listeners: Listeners<T>,
}

impl<T: Item> Subject<T> {
    /// Creates a subject with no subscribers.
    pub fn new() -> Self {
        Self {
            listeners: Listeners::new(),
        }
    }

    /// Delivers `value` to every current subscriber.
    pub fn emit(&self, value: T) {
        self.listeners.emit(&value);
    }

    /// Stream of every event emitted from now on.
    pub fn stream(&self) -> Stream<T> {
        let listeners = self.listeners.clone();
        Stream::new(move |listener: Listener<T>| listeners.add(Arc::clone(&listener)))
    }

    /// Number of attached listeners.
    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }
}

impl<T: Item> Default for Subject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Subject<T> {
    fn clone(&self) -> Self {
        Self {
            listeners: self.listeners.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[test]
    fn test_no_replay() {
        let subject = Subject::new();
        subject.emit(1);

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let subscription = subject.stream().subscribe(move |v: &i32| sink.lock().unwrap().push(*v));
        subject.emit(2);
        drop(subscription);
        subject.emit(3);

        assert_eq!(*seen.lock().unwrap(), vec![2]);
        assert_eq!(subject.subscriber_count(), 0);
    }
}
