//! Error types for completion backends.

use thiserror::Error;

/// Errors that can occur when calling a completion backend.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// Backend is misconfigured (missing key, bad URL).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Transport-level failure talking to the backend.
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with an error status.
    #[error("upstream error ({status}): {message}")]
    Upstream { status: u16, message: String },

    /// The backend answered successfully but with no usable content.
    #[error("completion contained no content")]
    EmptyCompletion,
}
