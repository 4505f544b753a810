//! Field accessor registry

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::Value;
use crate::error::FieldError;

/// Projects a row onto the value of one field.
pub type Accessor<T> = Arc<dyn Fn(&T) -> Value + Send + Sync>;

/// Explicit per-field accessors for a row type.
///
/// Filter and sort states name fields by id; this registry resolves an id
/// to a typed projection of the row instead of reflecting over it at
/// runtime. Build it once per pipeline. Registering the same id twice keeps
/// the last accessor.
///
/// # Example
///
/// ```
/// use emtable_lib::model::{Fields, Value};
///
/// struct User {
///     name: String,
///     age: Option<u32>,
/// }
///
/// let fields = Fields::new()
///     .field("name", |u: &User| Value::from(&u.name))
///     .field("age", |u: &User| Value::from(u.age));
///
/// let user = User { name: "Ann".into(), age: None };
/// assert_eq!(fields.value(&user, "name").unwrap(), Value::from("Ann"));
/// assert!(fields.value(&user, "age").unwrap().is_null());
/// assert!(fields.value(&user, "email").is_err());
/// ```
pub struct Fields<T> {
    accessors: HashMap<String, Accessor<T>>,
    order: Vec<String>,
}

impl<T> Fields<T> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            accessors: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Registers the accessor for a field.
    pub fn field<F>(mut self, id: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&T) -> Value + Send + Sync + 'static,
    {
        let id = id.into();
        if !self.accessors.contains_key(&id) {
            self.order.push(id.clone());
        }
        self.accessors.insert(id, Arc::new(accessor));
        self
    }

    /// Returns the accessor for a field.
    pub fn get(&self, id: &str) -> Result<&Accessor<T>, FieldError> {
        self.accessors.get(id).ok_or_else(|| FieldError::missing(id))
    }

    /// Reads one field of a row.
    pub fn value(&self, row: &T, id: &str) -> Result<Value, FieldError> {
        self.get(id).map(|accessor| accessor(row))
    }

    /// Returns `true` if an accessor is registered for the field.
    pub fn contains(&self, id: &str) -> bool {
        self.accessors.contains_key(id)
    }

    /// Registered field ids, in registration order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}

impl<T> Default for Fields<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Fields<T> {
    fn clone(&self) -> Self {
        Self {
            accessors: self.accessors.clone(),
            order: self.order.clone(),
        }
    }
}

impl<T> fmt::Debug for Fields<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fields").field("ids", &self.order).finish()
    }
}
