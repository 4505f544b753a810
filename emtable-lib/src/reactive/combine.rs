//! Stream constructors and multi-input combinators

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use super::Item;
use super::Listener;
use super::Stream;
use super::Subscription;

fn lock<V>(mutex: &Mutex<V>) -> MutexGuard<'_, V> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// A stream that emits `value` once to each subscriber.
pub fn of<T: Item>(value: T) -> Stream<T> {
    Stream::new(move |listener: Listener<T>| {
        listener(&value);
        Subscription::empty()
    })
}

/// Forwards the values of every input as they arrive.
pub fn merge<T: Item>(streams: impl IntoIterator<Item = Stream<T>>) -> Stream<T> {
    let streams: Vec<Stream<T>> = streams.into_iter().collect();
    Stream::new(move |listener: Listener<T>| {
        let mut subscription = Subscription::empty();
        for stream in &streams {
            let listener = Arc::clone(&listener);
            subscription.add(stream.subscribe(move |value| listener(value)));
        }
        subscription
    })
}

/// Pairs the latest values of two streams.
///
/// Nothing is emitted until both inputs have emitted once; afterwards every
/// value on either side is paired with the most recent value of the other.
///
/// # Example
///
/// ```
/// use std::sync::{Arc, Mutex};
/// use emtable_lib::reactive::{combine_latest2, State, Subject};
///
/// let size = State::new(10);
/// let names = Subject::new();
/// let combined = combine_latest2(&size.stream(), &names.stream());
///
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink = seen.clone();
/// let _subscription = combined.subscribe(move |pair| sink.lock().unwrap().push(*pair));
///
/// size.set(20);
/// names.emit("a");
/// size.set(30);
/// assert_eq!(*seen.lock().unwrap(), vec![(20, "a"), (30, "a")]);
/// ```
pub fn combine_latest2<A: Item, B: Item>(a: &Stream<A>, b: &Stream<B>) -> Stream<(A, B)> {
    let a = a.clone();
    let b = b.clone();
    Stream::new(move |listener: Listener<(A, B)>| {
        let latest: Arc<Mutex<(Option<A>, Option<B>)>> = Arc::new(Mutex::new((None, None)));

        let on_a = {
            let latest = Arc::clone(&latest);
            let listener = Arc::clone(&listener);
            move |value: &A| {
                let combined = {
                    let mut latest = lock(&latest);
                    latest.0 = Some(value.clone());
                    ready2(&*latest)
                };
                if let Some(combined) = combined {
                    listener(&combined);
                }
            }
        };
        let on_b = move |value: &B| {
            let combined = {
                let mut latest = lock(&latest);
                latest.1 = Some(value.clone());
                ready2(&*latest)
            };
            if let Some(combined) = combined {
                listener(&combined);
            }
        };

        let mut subscription = a.subscribe(on_a);
        subscription.add(b.subscribe(on_b));
        subscription
    })
}

fn ready2<A: Clone, B: Clone>(latest: &(Option<A>, Option<B>)) -> Option<(A, B)> {
    match latest {
        (Some(a), Some(b)) => Some((a.clone(), b.clone())),
        _ => None,
    }
}

/// Combines the latest values of three streams; see [`combine_latest2`].
pub fn combine_latest3<A: Item, B: Item, C: Item>(a: &Stream<A>, b: &Stream<B>, c: &Stream<C>) -> Stream<(A, B, C)> {
    combine_latest2(&combine_latest2(a, b), c).map(|((a, b), c)| (a.clone(), b.clone(), c.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::State;
    use crate::reactive::Subject;

    fn collect<T: Item>(stream: &Stream<T>) -> (Arc<Mutex<Vec<T>>>, Subscription) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let subscription = stream.subscribe(move |v: &T| sink.lock().unwrap().push(v.clone()));
        (seen, subscription)
    }

    #[test]
    fn test_of_emits_once_per_subscriber() {
        let stream = of(7);
        let (first, _a) = collect(&stream);
        let (second, _b) = collect(&stream);
        assert_eq!(*first.lock().unwrap(), vec![7]);
        assert_eq!(*second.lock().unwrap(), vec![7]);
    }

    #[test]
    fn test_merge_interleaves_by_arrival() {
        let left = Subject::new();
        let right = Subject::new();
        let (seen, _subscription) = collect(&merge([left.stream(), right.stream()]));

        left.emit(1);
        right.emit(2);
        left.emit(3);
        assert_eq!(*seen.lock().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_combine_latest3_waits_for_every_input() {
        let a = State::new(1);
        let b = Subject::new();
        let c = State::new('x');
        let (seen, subscription) = collect(&combine_latest3(&a.stream(), &b.stream(), &c.stream()));

        assert!(seen.lock().unwrap().is_empty());
        b.emit("b");
        c.set('y');
        a.set(2);
        assert_eq!(*seen.lock().unwrap(), vec![(1, "b", 'x'), (1, "b", 'y'), (2, "b", 'y')]);

        drop(subscription);
        assert_eq!(a.subscriber_count(), 0);
        assert_eq!(b.subscriber_count(), 0);
        assert_eq!(c.subscriber_count(), 0);
    }
}
