//! Configuration error types.

use thiserror::Error;

/// Errors that can occur while loading or saving transition configuration
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    /// Serialization to JSON failed
    #[error("Serialization failed: {0}")]
    Serialization(String),

    /// Deserialization from JSON failed
    #[error("Deserialization failed: {0}")]
    Deserialization(String),
}
