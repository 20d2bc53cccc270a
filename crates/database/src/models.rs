//! Database models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A stored user profile row.
///
/// Health record fields are nullable as a block: they are absent until
/// the first food-history submission and replaced wholesale afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UserProfileRow {
    /// External identity from the auth collaborator.
    pub user_id: String,
    /// Email captured at profile creation, if known.
    pub email: Option<String>,
    /// Raw food history text as submitted.
    pub food_history: Option<String>,
    /// Parsed health score in [0, 100].
    pub health_score: Option<i64>,
    /// Parsed feedback message.
    pub health_message: Option<String>,
    /// JSON-encoded array of suggestion strings.
    pub suggestions: Option<String>,
    /// When the profile was created.
    pub created_at: String,
    /// When the profile was last updated.
    pub updated_at: String,
}

/// A stored transcript turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct TurnRow {
    /// Auto-incrementing ID.
    pub id: i64,
    /// Owning user.
    pub user_id: String,
    /// Zero-based position within the user's transcript.
    pub position: i64,
    /// Role: "user" or "assistant".
    pub role: String,
    /// Turn content.
    pub content: String,
    /// Question kind, only set on user turns.
    pub kind: Option<String>,
    /// Creation timestamp.
    pub created_at: String,
}

/// Partial update applied to a profile's health columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthRecordUpdate {
    /// Raw food history text.
    pub food_history: String,
    /// Parsed score.
    pub health_score: i64,
    /// Parsed message.
    pub health_message: String,
    /// Suggestion strings, stored JSON-encoded.
    pub suggestions: Vec<String>,
}
