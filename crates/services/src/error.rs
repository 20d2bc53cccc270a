//! Error types for service operations.

use assistant_core::CompletionError;
use database::DatabaseError;
use thiserror::Error;

/// Errors that can occur while orchestrating a request.
///
/// Parsing failures never appear here: the health-reply parser is total
/// and degrades to defaults instead of erroring.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Operation on a user with no stored profile.
    #[error("user not found: {0}")]
    NotFound(String),

    /// Malformed request shape (e.g. unsupported question kind).
    #[error("validation failed: {0}")]
    Validation(String),

    /// Completion backend failure.
    #[error("completion error: {0}")]
    Completion(#[from] CompletionError),

    /// Document store failure.
    #[error("database error: {0}")]
    Database(#[from] DatabaseError),
}
