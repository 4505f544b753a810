//! Configuration errors

/// Errors that can occur while loading a [`TableConfig`](crate::TableConfig).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The configuration document could not be decoded.
    #[error("Config parse error: {0}")]
    Parse(String),

    /// A value was decoded but is not usable.
    #[error("Invalid config value for '{key}': {message}")]
    Invalid { key: &'static str, message: String },
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
