//! User profile service and profile view types.

use assistant_core::{Turn, UNPARSEABLE_REPLY};
use database::{profile, transcript, Database, DatabaseError, UserProfileRow};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ServiceError;

/// A structured health record, as returned to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthRecord {
    /// Raw food history text as submitted.
    pub food_history: String,
    /// Health score in [0, 100].
    pub score: i64,
    /// Feedback message.
    pub message: String,
    /// Suggestions in model order; may be empty.
    pub suggestions: Vec<String>,
}

/// A user profile materialized for the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// External user identity.
    pub user_id: String,
    /// Email captured at profile creation, if known.
    pub email: Option<String>,
    /// Health record, absent until the first food-history submission.
    pub health_record: Option<HealthRecord>,
    /// Full chat transcript, oldest turn first.
    pub transcript: Vec<Turn>,
}

/// Materialize a health record from a stored row.
///
/// Rows written by older schema revisions may miss individual columns;
/// absent fields get the parser's documented defaults rather than
/// failing.
pub(crate) fn health_record_from_row(row: &UserProfileRow) -> Option<HealthRecord> {
    if row.health_score.is_none() && row.food_history.is_none() {
        return None;
    }

    let suggestions = row
        .suggestions
        .as_deref()
        .and_then(|json| serde_json::from_str(json).ok())
        .unwrap_or_default();

    Some(HealthRecord {
        food_history: row.food_history.clone().unwrap_or_default(),
        score: row.health_score.unwrap_or(50),
        message: row
            .health_message
            .clone()
            .unwrap_or_else(|| UNPARSEABLE_REPLY.to_string()),
        suggestions,
    })
}

/// Lazily materializes user profiles on first access.
pub struct UserProfileService {
    db: Database,
}

impl UserProfileService {
    /// Create a new profile service.
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Get a user's profile, creating an empty one on first access.
    ///
    /// Idempotent: a second call for the same user performs no write and
    /// returns the stored profile verbatim.
    pub async fn get_or_create(
        &self,
        user_id: &str,
        email: Option<&str>,
    ) -> Result<UserProfile, ServiceError> {
        if let Some(row) = profile::get_profile(self.db.pool(), user_id).await? {
            return self.materialize(row).await;
        }

        debug!("Creating profile for {}", user_id);
        match profile::create_profile(self.db.pool(), user_id, email).await {
            Ok(()) => {}
            // Lost a creation race; the stored row wins
            Err(DatabaseError::AlreadyExists { .. }) => {
                warn!("Profile for {} created concurrently", user_id);
            }
            Err(e) => return Err(e.into()),
        }

        let row = profile::get_profile(self.db.pool(), user_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(user_id.to_string()))?;
        self.materialize(row).await
    }

    async fn materialize(&self, row: UserProfileRow) -> Result<UserProfile, ServiceError> {
        let turns = transcript::load_turns(self.db.pool(), &row.user_id).await?;

        Ok(UserProfile {
            health_record: health_record_from_row(&row),
            user_id: row.user_id,
            email: row.email,
            transcript: transcript::rows_to_turns(turns),
        })
    }
}
