//! Error types for the achievement inference crate.
//!
//! Queries never fail; only decoding records or configuration at the JSON/YAML
//! boundary can.

use thiserror::Error;

/// Result type for decoding operations
pub type Result<T> = std::result::Result<T, InferenceError>;

/// Inference error types
#[derive(Error, Debug)]
pub enum InferenceError {
    /// Records could not be decoded
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration could not be decoded
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for InferenceError {
    fn from(err: serde_json::Error) -> Self {
        InferenceError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for InferenceError {
    fn from(err: serde_yaml::Error) -> Self {
        InferenceError::Config(err.to_string())
    }
}
