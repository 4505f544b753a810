//! FieldError for row field accessors

/// Error type for field access on table rows.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
    /// No accessor is registered for the requested field.
    #[error("Field '{field}' has no registered accessor")]
    Missing { field: String },

    /// The field exists but holds a type the operation cannot work with.
    #[error("Field '{field}' type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        actual: &'static str,
    },
}

impl FieldError {
    /// Creates a new missing field error.
    pub fn missing(field: impl Into<String>) -> Self {
        Self::Missing {
            field: field.into(),
        }
    }

    /// Creates a new type mismatch error.
    pub fn type_mismatch(field: impl Into<String>, expected: &'static str, actual: &'static str) -> Self {
        Self::TypeMismatch {
            field: field.into(),
            expected,
            actual,
        }
    }

    /// Returns the field the error refers to.
    pub fn field(&self) -> &str {
        match self {
            Self::Missing { field } => field,
            Self::TypeMismatch { field, .. } => field,
        }
    }
}
