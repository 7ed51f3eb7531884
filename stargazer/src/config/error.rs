//! Configuration error types.

use thiserror::Error;

/// Errors that can occur while loading or validating client configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a file.
    #[error("Failed to read file '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML content.
    #[error("Failed to parse config file '{path}': {source}")]
    TomlError {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// A setting holds an unusable value.
    #[error("Invalid value for '{field}': {message}")]
    ValidationError { field: String, message: String },
}
