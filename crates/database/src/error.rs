//! Storage error types.

use thiserror::Error;

/// Errors surfaced by the persistence layer.
///
/// The `entity` field names what was looked up or inserted, currently
/// `"UserProfile"`; transcript reads never miss (an absent transcript is
/// just empty).
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Underlying SQLx failure while talking to SQLite.
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Schema migration failed at startup.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// No stored row for the given user.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// An insert collided with an existing row, e.g. a profile created
    /// twice for the same user.
    #[error("{entity} already exists: {id}")]
    AlreadyExists { entity: &'static str, id: String },
}

/// Result alias used across the storage modules.
pub type Result<T> = std::result::Result<T, DatabaseError>;
