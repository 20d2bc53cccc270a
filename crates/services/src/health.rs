//! Food-history scoring pipeline.

use std::sync::Arc;

use assistant_core::{parse_health_reply, Completion, CompletionRequest};
use database::{profile, Database, DatabaseError, HealthRecordUpdate};
use tracing::{debug, info};

use crate::error::ServiceError;
use crate::profile::HealthRecord;
use crate::prompts;

/// Token budget for a scoring reply (score + message + a few bullets).
const SCORE_MAX_TOKENS: u32 = 256;

/// Scoring runs deterministic.
const SCORE_TEMPERATURE: f32 = 0.0;

/// Orchestrates: build prompt -> call LLM -> parse -> persist.
pub struct HealthProfileService {
    db: Database,
    completion: Arc<dyn Completion>,
}

impl HealthProfileService {
    /// Create a new health profile service.
    pub fn new(db: Database, completion: Arc<dyn Completion>) -> Self {
        Self { db, completion }
    }

    /// Score a food history and persist the structured record.
    ///
    /// The health record replaces the previous one wholesale; nothing is
    /// persisted if the completion call fails. Parse failures degrade to
    /// the parser's defaults and still persist.
    pub async fn submit_food_history(
        &self,
        user_id: &str,
        food_history: &str,
    ) -> Result<HealthRecord, ServiceError> {
        let request = CompletionRequest {
            messages: vec![assistant_core::ChatMessage::user(prompts::food_score_prompt(
                food_history,
            ))],
            max_tokens: Some(SCORE_MAX_TOKENS),
            temperature: Some(SCORE_TEMPERATURE),
            system: None,
        };

        let raw = self.completion.complete(request).await?;
        debug!("Raw scoring reply for {}: {}", user_id, raw);

        let reply = parse_health_reply(&raw);

        // Merge-style write: the profile is created on first submission
        let update = HealthRecordUpdate {
            food_history: food_history.to_string(),
            health_score: reply.score,
            health_message: reply.message.clone(),
            suggestions: reply.suggestions.clone(),
        };
        match profile::update_health_record(self.db.pool(), user_id, &update).await {
            Ok(()) => {}
            Err(DatabaseError::NotFound { .. }) => {
                match profile::create_profile(self.db.pool(), user_id, None).await {
                    Ok(()) | Err(DatabaseError::AlreadyExists { .. }) => {}
                    Err(e) => return Err(e.into()),
                }
                profile::update_health_record(self.db.pool(), user_id, &update).await?;
            }
            Err(e) => return Err(e.into()),
        }

        info!("Stored health score {} for {}", reply.score, user_id);

        Ok(HealthRecord {
            food_history: food_history.to_string(),
            score: reply.score,
            message: reply.message,
            suggestions: reply.suggestions,
        })
    }
}
