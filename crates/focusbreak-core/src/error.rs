//! Error types for focusbreak-core.
//!
//! Invalid lifecycle transitions are silent no-ops by design, not errors;
//! the only fatal condition is a host presentation surface that cannot be
//! brought up, which fails at startup rather than per call.

use thiserror::Error;

/// Core error type for focusbreak-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Presenter-related errors
    #[error("Presenter error: {0}")]
    Presenter(#[from] PresenterError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Presenter-specific errors.
#[derive(Error, Debug)]
pub enum PresenterError {
    /// The host presentation surface could not be initialized
    #[error("presenter unavailable: {0}")]
    Unavailable(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
