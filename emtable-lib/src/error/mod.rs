//! Error types

mod config;
mod date_offset;
mod field;

pub use config::*;
pub use date_offset::*;
pub use field::*;

/// Any failure raised while transforming table data.
///
/// Every variant is a logic or configuration defect of the integrating
/// application rather than a transient condition, so nothing here is retried.
/// The type is `Clone` so it can travel through reactive streams as part of a
/// `Result` value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TableError {
    /// Field lookup or field type problem.
    #[error(transparent)]
    Field(#[from] FieldError),

    /// DateOffset arithmetic was asked to do more than it supports.
    #[error(transparent)]
    DateOffset(#[from] DateOffsetError),

    /// Table configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TableError>;
