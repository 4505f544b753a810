//! Per-field transform overrides

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::model::FilterState;
use crate::model::SortState;

/// A custom transform replacing the built-in one for a single field.
pub type Transform<T, S> = Arc<dyn Fn(&[T], &S) -> Result<Vec<T>> + Send + Sync>;

/// Registry of per-field overrides, keyed by field id.
///
/// Registering a second transform for a field replaces the first.
pub struct Overrides<T, S> {
    transforms: HashMap<String, Transform<T, S>>,
}

/// Overrides consulted by the filter operator.
pub type FilterOverrides<T> = Overrides<T, FilterState>;

/// Overrides consulted by the sort operator.
pub type SortOverrides<T> = Overrides<T, SortState>;

impl<T, S> Overrides<T, S> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            transforms: HashMap::new(),
        }
    }

    /// Registers the transform for `field`.
    pub fn with<F>(mut self, field: impl Into<String>, transform: F) -> Self
    where
        F: Fn(&[T], &S) -> Result<Vec<T>> + Send + Sync + 'static,
    {
        self.insert(field, transform);
        self
    }

    /// Registers the transform for `field` in place.
    pub fn insert<F>(&mut self, field: impl Into<String>, transform: F)
    where
        F: Fn(&[T], &S) -> Result<Vec<T>> + Send + Sync + 'static,
    {
        let field = field.into();
        if self.transforms.insert(field.clone(), Arc::new(transform)).is_some() {
            log::debug!("[operators] Override for field '{}' replaced", field);
        }
    }

    /// Returns the transform registered for `field`.
    pub fn get(&self, field: &str) -> Option<&Transform<T, S>> {
        self.transforms.get(field)
    }

    /// Returns `true` if no override is registered.
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }
}

impl<T, S> Default for Overrides<T, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S> Clone for Overrides<T, S> {
    fn clone(&self) -> Self {
        Self {
            transforms: self.transforms.clone(),
        }
    }
}

impl<T, S> fmt::Debug for Overrides<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut fields: Vec<&String> = self.transforms.keys().collect();
        fields.sort();
        f.debug_struct("Overrides").field("fields", &fields).finish()
    }
}
