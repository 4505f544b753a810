//! Subscription handles with teardown on drop

use std::fmt;

/// Handle to an active subscription.
///
/// Dropping the handle (or calling [`Subscription::unsubscribe`]) runs its
/// teardown and then tears down every child added with
/// [`Subscription::add`]. Teardown runs at most once.
///
/// Binding the handle to `_` drops it immediately; keep it in a named
/// variable or a field for as long as the listener should stay attached.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    teardown: Option<Box<dyn FnOnce() + Send>>,
    children: Vec<Subscription>,
}

impl Subscription {
    /// Creates a subscription that runs `teardown` when closed.
    pub fn new<F>(teardown: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            teardown: Some(Box::new(teardown)),
            children: Vec::new(),
        }
    }

    /// Creates a subscription with nothing to tear down.
    pub fn empty() -> Self {
        Self {
            teardown: None,
            children: Vec::new(),
        }
    }

    /// Ties the lifetime of `child` to this subscription.
    pub fn add(&mut self, child: Subscription) {
        self.children.push(child);
    }

    /// Runs the teardown now. Further calls do nothing.
    pub fn unsubscribe(&mut self) {
        if let Some(teardown) = self.teardown.take() {
            teardown();
        }
        for mut child in self.children.drain(..) {
            child.unsubscribe();
        }
    }

    /// Returns `true` once nothing is left to tear down.
    pub fn is_closed(&self) -> bool {
        self.teardown.is_none() && self.children.is_empty()
    }
}

impl Default for Subscription {
    fn default() -> Self {
        Self::empty()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("closed", &self.is_closed())
            .field("children", &self.children.len())
            .finish()
    }
}
