//! Cold composable streams

use std::fmt;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::time::Duration;

use futures::channel::mpsc;
use tokio::runtime::Handle;
use tokio::task::AbortHandle;

use super::Item;
use super::Listener;
use super::Subscription;

type SubscribeFn<T> = dyn Fn(Listener<T>) -> Subscription + Send + Sync;

/// A subscribable description of a value sequence.
///
/// Streams are cold: nothing runs until [`Stream::subscribe`] is called, and
/// every subscription runs the whole chain independently (each gets its own
/// [`scan`](Stream::scan) accumulator, its own debounce timer, and so on).
/// Operators return new streams and never modify the receiver.
///
/// # Example
///
/// ```
/// use std::sync::{Arc, Mutex};
/// use emtable_lib::reactive::Subject;
///
/// let clicks = Subject::new();
/// let total = clicks.stream().scan(0, |sum, n: &i32| sum + n).map(|sum| sum * 10);
///
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink = seen.clone();
/// let _subscription = total.subscribe(move |v| sink.lock().unwrap().push(*v));
///
/// clicks.emit(1);
/// clicks.emit(2);
/// assert_eq!(*seen.lock().unwrap(), vec![10, 30]);
/// ```
pub struct Stream<T> {
    subscribe_fn: Arc<SubscribeFn<T>>,
}

fn lock<V>(mutex: &Mutex<V>) -> MutexGuard<'_, V> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl<T: Item> Stream<T> {
    /// Creates a stream from its subscribe function.
    ///
    /// The function receives the downstream listener and returns the
    /// subscription that detaches it again.
    pub fn new<F>(subscribe_fn: F) -> Self
    where
        F: Fn(Listener<T>) -> Subscription + Send + Sync + 'static,
    {
        Self {
            subscribe_fn: Arc::new(subscribe_fn),
        }
    }

    /// Starts the stream, calling `f` for every value until the returned
    /// subscription is dropped.
    pub fn subscribe<F>(&self, f: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.subscribe_listener(Arc::new(f))
    }

    fn subscribe_listener(&self, listener: Listener<T>) -> Subscription {
        (self.subscribe_fn)(listener)
    }

    /// Transforms every value.
    pub fn map<U, F>(&self, f: F) -> Stream<U>
    where
        U: Item,
        F: Fn(&T) -> U + Send + Sync + 'static,
    {
        let source = self.clone();
        let f = Arc::new(f);
        Stream::new(move |listener: Listener<U>| {
            let f = Arc::clone(&f);
            source.subscribe(move |value| listener(&f(value)))
        })
    }

    /// Forwards only the values matching `predicate`.
    pub fn filter<F>(&self, predicate: F) -> Stream<T>
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        let source = self.clone();
        let predicate = Arc::new(predicate);
        Stream::new(move |listener: Listener<T>| {
            let predicate = Arc::clone(&predicate);
            source.subscribe(move |value| {
                if predicate(value) {
                    listener(value);
                }
            })
        })
    }

    /// Running fold: emits the accumulator after every value.
    ///
    /// The accumulator starts from `seed` for each subscription.
    pub fn scan<A, F>(&self, seed: A, f: F) -> Stream<A>
    where
        A: Item,
        F: Fn(&A, &T) -> A + Send + Sync + 'static,
    {
        let source = self.clone();
        let f = Arc::new(f);
        Stream::new(move |listener: Listener<A>| {
            let f = Arc::clone(&f);
            let acc = Arc::new(Mutex::new(seed.clone()));
            source.subscribe(move |value| {
                let next = {
                    let mut acc = lock(&acc);
                    let next = f(&acc, value);
                    *acc = next.clone();
                    next
                };
                listener(&next);
            })
        })
    }

    /// Emits `value` to each subscriber before anything else.
    pub fn start_with(&self, value: T) -> Stream<T> {
        let source = self.clone();
        Stream::new(move |listener: Listener<T>| {
            listener(&value);
            source.subscribe_listener(listener)
        })
    }

    /// Suppresses values equal to the previously forwarded one.
    pub fn distinct_until_changed(&self) -> Stream<T>
    where
        T: PartialEq,
    {
        let source = self.clone();
        Stream::new(move |listener: Listener<T>| {
            let last: Arc<Mutex<Option<T>>> = Arc::new(Mutex::new(None));
            source.subscribe(move |value| {
                let changed = {
                    let mut last = lock(&last);
                    if last.as_ref() == Some(value) {
                        false
                    } else {
                        *last = Some(value.clone());
                        true
                    }
                };
                if changed {
                    listener(value);
                }
            })
        })
    }

    /// Pairs every value with the latest value of `other`.
    ///
    /// Values arriving before `other` has emitted are dropped; emissions of
    /// `other` alone never trigger output.
    pub fn with_latest_from<U: Item>(&self, other: &Stream<U>) -> Stream<(T, U)> {
        let source = self.clone();
        let other = other.clone();
        Stream::new(move |listener: Listener<(T, U)>| {
            let latest: Arc<Mutex<Option<U>>> = Arc::new(Mutex::new(None));

            let store = Arc::clone(&latest);
            let mut subscription = other.subscribe(move |value| {
                *lock(&store) = Some(value.clone());
            });

            subscription.add(source.subscribe(move |value| {
                let paired = lock(&latest).clone();
                if let Some(other_value) = paired {
                    listener(&(value.clone(), other_value));
                }
            }));
            subscription
        })
    }

    /// Maps every value to an inner stream and mirrors only the most recent
    /// one; the previous inner subscription is dropped first.
    pub fn switch_map<U, F>(&self, f: F) -> Stream<U>
    where
        U: Item,
        F: Fn(&T) -> Stream<U> + Send + Sync + 'static,
    {
        let source = self.clone();
        let f = Arc::new(f);
        Stream::new(move |listener: Listener<U>| {
            let f = Arc::clone(&f);
            let inner: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));

            let current = Arc::clone(&inner);
            let mut subscription = source.subscribe(move |value| {
                let previous = lock(&current).take();
                drop(previous);
                let next = f(value).subscribe_listener(Arc::clone(&listener));
                *lock(&current) = Some(next);
            });

            subscription.add(Subscription::new(move || {
                let last = lock(&inner).take();
                drop(last);
            }));
            subscription
        })
    }

    /// Emits a value only after `quiet` passed without another value.
    ///
    /// Timers run on the Tokio runtime current at emission time. Without a
    /// runtime the value is forwarded immediately. Dropping the subscription
    /// cancels a pending emission.
    pub fn debounce(&self, quiet: Duration) -> Stream<T> {
        let source = self.clone();
        Stream::new(move |listener: Listener<T>| {
            let pending: Arc<Mutex<Option<AbortHandle>>> = Arc::new(Mutex::new(None));

            let timer = Arc::clone(&pending);
            let mut subscription = source.subscribe(move |value| match Handle::try_current() {
                Ok(handle) => {
                    let listener = Arc::clone(&listener);
                    let value = value.clone();
                    let task = handle.spawn(async move {
                        tokio::time::sleep(quiet).await;
                        listener(&value);
                    });
                    if let Some(previous) = lock(&timer).replace(task.abort_handle()) {
                        previous.abort();
                    }
                }
                Err(_) => {
                    log::warn!("[reactive] debounce without a Tokio runtime, emitting immediately");
                    listener(value);
                }
            });

            subscription.add(Subscription::new(move || {
                if let Some(task) = lock(&pending).take() {
                    task.abort();
                }
            }));
            subscription
        })
    }

    /// Bridges the stream into an async channel.
    ///
    /// The receiver yields every value until the returned subscription is
    /// dropped.
    pub fn to_receiver(&self) -> (mpsc::UnboundedReceiver<T>, Subscription) {
        let (tx, rx) = mpsc::unbounded();
        let subscription = self.subscribe(move |value| {
            // a dropped receiver only means nobody listens anymore
            let _ = tx.unbounded_send(value.clone());
        });
        (rx, subscription)
    }
}

impl<T> Clone for Stream<T> {
    fn clone(&self) -> Self {
        Self {
            subscribe_fn: Arc::clone(&self.subscribe_fn),
        }
    }
}

impl<T> fmt::Debug for Stream<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stream").finish_non_exhaustive()
    }
}
