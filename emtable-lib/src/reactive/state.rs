//! Replay-latest value cell

use std::fmt;
use std::sync::Arc;
use std::sync::RwLock;

use super::Item;
use super::Listener;
use super::Stream;
use super::Subscription;
use super::listeners::Listeners;

/// Reactive state cell with interior mutability.
///
/// `State<T>` stores its current value behind `Arc<RwLock<T>>`, so clones
/// are cheap and share the same cell. Every subscriber first receives the
/// current value, then every later value, synchronously and in subscription
/// order. The lock is never held while listeners run, so a listener may
/// read or set the cell it observes.
///
/// # Example
///
/// ```
/// use std::sync::{Arc, Mutex};
/// use emtable_lib::reactive::State;
///
/// let count = State::new(1);
/// let seen = Arc::new(Mutex::new(Vec::new()));
///
/// let sink = seen.clone();
/// let subscription = count.subscribe(move |v| sink.lock().unwrap().push(*v));
///
/// count.set(2);
/// count.update(|v| *v += 10);
/// drop(subscription);
/// count.set(99);
///
/// assert_eq!(*seen.lock().unwrap(), vec![1, 2, 12]);
/// assert_eq!(count.get(), 99);
/// ```
pub struct State<T> {
    inner: Arc<RwLock<T>>,
    listeners: Listeners<T>,
}

impl<T: Item> State<T> {
    /// Create a new state with the given value
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(RwLock::new(value)),
            listeners: Listeners::new(),
        }
    }

    /// Get a clone of the current value
    pub fn get(&self) -> T {
        self.inner
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    /// Set a new value and notify subscribers
    pub fn set(&self, value: T) {
        {
            let mut guard = self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner());
            *guard = value.clone();
        }
        self.listeners.emit(&value);
    }

    /// Update the value in place and notify subscribers
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut T),
    {
        let value = {
            let mut guard = self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner());
            f(&mut guard);
            guard.clone()
        };
        self.listeners.emit(&value);
    }

    /// Stream of the current value followed by every change
    pub fn stream(&self) -> Stream<T> {
        let state = self.clone();
        Stream::new(move |listener: Listener<T>| {
            let subscription = state.listeners.add(Arc::clone(&listener));
            listener(&state.get());
            subscription
        })
    }

    /// Shorthand for `self.stream().subscribe(f)`
    pub fn subscribe<F>(&self, f: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.stream().subscribe(f)
    }

    /// Number of attached listeners
    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }
}

impl<T> Clone for State<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            listeners: self.listeners.clone(),
        }
    }
}

impl<T: Item + Default> Default for State<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Item + fmt::Debug> fmt::Debug for State<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("value", &self.get())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[test]
    fn test_replays_latest_on_subscribe() {
        let state = State::new("a".to_string());
        state.set("b".to_string());

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _subscription = state.subscribe(move |v: &String| sink.lock().unwrap().push(v.clone()));
        assert_eq!(*seen.lock().unwrap(), vec!["b".to_string()]);
    }

    #[test]
    fn test_clones_share_the_cell() {
        let state = State::new(0);
        let other = state.clone();
        other.set(5);
        assert_eq!(state.get(), 5);
    }

    #[test]
    fn test_reentrant_set_from_listener() {
        let state = State::new(0);
        let inner = state.clone();
        let _clamp = state.subscribe(move |v: &i32| {
            if *v > 10 {
                inner.set(10);
            }
        });

        state.set(42);
        assert_eq!(state.get(), 10);
    }

    #[test]
    fn test_drop_detaches_listener() {
        let state = State::new(0);
        let subscription = state.subscribe(|_: &i32| {});
        assert_eq!(state.subscriber_count(), 1);
        drop(subscription);
        assert_eq!(state.subscriber_count(), 0);
    }
}
