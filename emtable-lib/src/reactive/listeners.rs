//! Observer list shared by the hot sources

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::Weak;

use super::Item;
use super::Listener;
use super::Subscription;

struct Registry<T> {
    next_id: u64,
    entries: Vec<(u64, Listener<T>)>,
}

/// Id-keyed listener list.
///
/// Emission works on a snapshot taken outside the lock, so a listener may
/// subscribe, unsubscribe or emit again while it runs. A listener removed
/// mid-emission is skipped for the rest of that emission.
pub(crate) struct Listeners<T> {
    registry: Arc<Mutex<Registry<T>>>,
}

fn lock<T>(registry: &Mutex<Registry<T>>) -> MutexGuard<'_, Registry<T>> {
    registry.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl<T: Item> Listeners<T> {
    pub(crate) fn new() -> Self {
        Self {
            registry: Arc::new(Mutex::new(Registry {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }

    pub(crate) fn add(&self, listener: Listener<T>) -> Subscription {
        let id = {
            let mut registry = lock(&self.registry);
            let id = registry.next_id;
            registry.next_id += 1;
            registry.entries.push((id, listener));
            id
        };

        let weak: Weak<Mutex<Registry<T>>> = Arc::downgrade(&self.registry);
        Subscription::new(move || {
            if let Some(registry) = weak.upgrade() {
                // drop the listener after releasing the lock
                let removed = {
                    let mut registry = lock(&registry);
                    registry
                        .entries
                        .iter()
                        .position(|(entry, _)| *entry == id)
                        .map(|idx| registry.entries.remove(idx))
                };
                drop(removed);
            }
        })
    }

    pub(crate) fn emit(&self, value: &T) {
        let snapshot: Vec<(u64, Listener<T>)> = lock(&self.registry).entries.clone();
        for (id, listener) in snapshot {
            if self.is_registered(id) {
                listener(value);
            }
        }
    }

    pub(crate) fn len(&self) -> usize {
        lock(&self.registry).entries.len()
    }

    fn is_registered(&self, id: u64) -> bool {
        lock(&self.registry).entries.iter().any(|(entry, _)| *entry == id)
    }
}

impl<T> Clone for Listeners<T> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_reaches_listeners_in_order() {
        let listeners: Listeners<i32> = Listeners::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let first = Arc::clone(&seen);
        let _a = listeners.add(Arc::new(move |v: &i32| first.lock().unwrap().push(("a", *v))));
        let second = Arc::clone(&seen);
        let _b = listeners.add(Arc::new(move |v: &i32| second.lock().unwrap().push(("b", *v))));

        listeners.emit(&7);
        assert_eq!(*seen.lock().unwrap(), vec![("a", 7), ("b", 7)]);
    }

    #[test]
    fn test_unsubscribe_removes_listener() {
        let listeners: Listeners<i32> = Listeners::new();
        let subscription = listeners.add(Arc::new(|_: &i32| {}));
        assert_eq!(listeners.len(), 1);
        drop(subscription);
        assert_eq!(listeners.len(), 0);
    }

    #[test]
    fn test_listener_removed_mid_emission_is_skipped() {
        let listeners: Listeners<i32> = Listeners::new();
        let calls = Arc::new(Mutex::new(Vec::new()));
        let victim: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));

        let killer_calls = Arc::clone(&calls);
        let killer_victim = Arc::clone(&victim);
        let _killer = listeners.add(Arc::new(move |_: &i32| {
            killer_calls.lock().unwrap().push("killer");
            let taken = killer_victim.lock().unwrap().take();
            drop(taken);
        }));

        let victim_calls = Arc::clone(&calls);
        let subscription = listeners.add(Arc::new(move |_: &i32| {
            victim_calls.lock().unwrap().push("victim");
        }));
        *victim.lock().unwrap() = Some(subscription);

        listeners.emit(&1);
        assert_eq!(*calls.lock().unwrap(), vec!["killer"]);
    }
}
