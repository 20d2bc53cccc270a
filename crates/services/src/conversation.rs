//! Conversational question answering over the chat transcript.

use std::sync::Arc;

use assistant_core::{ChatMessage, ChatTranscript, Completion, CompletionRequest, Turn};
use database::{profile, transcript, Database};
use tracing::debug;

use crate::error::ServiceError;
use crate::locks::UserLocks;
use crate::prompts::{self, QuestionKind, CONTEXT_WINDOW_TURNS, DISCLAIMER, SYSTEM_PROMPT};

/// Orchestrates: load transcript -> build context -> call LLM -> persist.
///
/// Transcript writes go through a read-modify-write cycle over the whole
/// transcript, so operations for one user are serialized behind a
/// per-user lock.
pub struct ConversationService {
    db: Database,
    completion: Arc<dyn Completion>,
    locks: UserLocks,
}

impl ConversationService {
    /// Create a new conversation service.
    pub fn new(db: Database, completion: Arc<dyn Completion>) -> Self {
        Self {
            db,
            completion,
            locks: UserLocks::default(),
        }
    }

    /// Answer a symptom or medicine question.
    ///
    /// Requires the user's profile to exist; unlike profile access, asking
    /// never creates one. Appends exactly one user turn and one assistant
    /// turn, persists the whole transcript, and returns the reply with the
    /// updated transcript.
    pub async fn ask(
        &self,
        user_id: &str,
        message: &str,
        kind: &str,
    ) -> Result<(String, Vec<Turn>), ServiceError> {
        let kind = QuestionKind::parse(kind)?;

        let lock = self.locks.acquire(user_id).await;
        let _guard = lock.lock().await;

        let row = profile::get_profile(self.db.pool(), user_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(user_id.to_string()))?;

        let rows = transcript::load_turns(self.db.pool(), user_id).await?;
        let mut log = ChatTranscript::from_turns(transcript::rows_to_turns(rows));

        // Context window, then the templated question as the final turn
        let mut messages = log.context_window(CONTEXT_WINDOW_TURNS);
        messages.push(ChatMessage::user(prompts::question_prompt(
            kind,
            message,
            row.food_history.as_deref(),
        )));

        debug!(
            "Asking {:?} question for {} with {} context messages",
            kind,
            user_id,
            messages.len() - 1
        );

        let request = CompletionRequest {
            system: Some(SYSTEM_PROMPT.to_string()),
            messages,
            max_tokens: None,
            temperature: None,
        };
        let raw = self.completion.complete(request).await?;
        let reply = format!("{}{}", raw.trim(), DISCLAIMER);

        // The transcript stores the raw message, not the templated prompt
        log.append_exchange(message, Some(kind.as_str().to_string()), &reply);
        transcript::replace_turns(self.db.pool(), user_id, log.turns()).await?;

        Ok((reply, log.into_turns()))
    }

    /// Delete one asked question and its paired reply from the transcript.
    ///
    /// Returns the trailing assistant reply of the remaining transcript
    /// (or a fixed sentinel when none remains) along with the transcript.
    pub async fn delete(
        &self,
        user_id: &str,
        content: &str,
    ) -> Result<(String, Vec<Turn>), ServiceError> {
        let lock = self.locks.acquire(user_id).await;
        let _guard = lock.lock().await;

        let rows = transcript::load_turns(self.db.pool(), user_id).await?;
        let mut log = ChatTranscript::from_turns(transcript::rows_to_turns(rows));

        let last_reply = log.delete_by_user_content(content);
        transcript::replace_turns(self.db.pool(), user_id, log.turns()).await?;

        Ok((last_reply, log.into_turns()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mock_llm::ScriptedCompletion;

    async fn test_db() -> Database {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();
        db
    }

    async fn seeded_service(
        replies: impl IntoIterator<Item = impl Into<String>>,
    ) -> (ConversationService, Database, Arc<ScriptedCompletion>) {
        let db = test_db().await;
        profile::create_profile(db.pool(), "uid-1", None)
            .await
            .unwrap();
        let backend = Arc::new(ScriptedCompletion::new(replies));
        let service = ConversationService::new(db.clone(), backend.clone());
        (service, db, backend)
    }

    #[tokio::test]
    async fn test_ask_appends_exactly_two_turns() {
        let (service, _db, _backend) = seeded_service(["Drink water and rest."]).await;

        let (reply, turns) = service
            .ask("uid-1", "What helps a headache?", "symptom")
            .await
            .unwrap();

        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].role, "user");
        assert_eq!(turns[0].content, "What helps a headache?");
        assert_eq!(turns[0].kind.as_deref(), Some("symptom"));
        assert_eq!(turns[1].role, "assistant");
        assert_eq!(turns[1].content, reply);
        assert!(reply.starts_with("Drink water and rest."));
        assert!(reply.contains("Disclaimer"));
    }

    #[tokio::test]
    async fn test_ask_requires_existing_profile() {
        let db = test_db().await;
        let backend = Arc::new(ScriptedCompletion::new(["unused"]));
        let service = ConversationService::new(db, backend);

        let result = service.ask("ghost", "hi", "symptom").await;
        assert!(matches!(result, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_ask_rejects_unknown_kind() {
        let (service, _db, backend) = seeded_service(["unused"]).await;

        let result = service.ask("uid-1", "hi", "horoscope").await;

        assert!(matches!(result, Err(ServiceError::Validation(_))));
        // Rejected before any completion call
        assert!(backend.requests().await.is_empty());
    }

    #[tokio::test]
    async fn test_ask_sends_system_prompt_and_context() {
        let (service, _db, backend) = seeded_service(["first", "second"]).await;

        service.ask("uid-1", "Q1", "symptom").await.unwrap();
        service.ask("uid-1", "Q2", "medicine").await.unwrap();

        let requests = backend.requests().await;
        assert_eq!(requests[0].system.as_deref(), Some(SYSTEM_PROMPT));
        // Second request sees the first exchange as context plus the new question
        assert_eq!(requests[1].messages.len(), 3);
        assert_eq!(requests[1].messages[0].content, "Q1");
        assert_eq!(requests[1].messages[1].role, "assistant");
        assert!(requests[1].messages[2].content.contains("Q2"));
    }

    #[tokio::test]
    async fn test_ask_persists_transcript() {
        let (service, db, _backend) = seeded_service(["reply"]).await;

        service.ask("uid-1", "Q1", "symptom").await.unwrap();

        let rows = transcript::load_turns(db.pool(), "uid-1").await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].content, "Q1");
    }

    #[tokio::test]
    async fn test_completion_failure_leaves_transcript_unchanged() {
        let (service, db, _backend) = seeded_service(Vec::<String>::new()).await;

        let result = service.ask("uid-1", "Q1", "symptom").await;

        assert!(matches!(result, Err(ServiceError::Completion(_))));
        let rows = transcript::load_turns(db.pool(), "uid-1").await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_delete_removes_pair_and_returns_trailing_reply() {
        let (service, _db, _backend) = seeded_service(["A1", "A2"]).await;

        service.ask("uid-1", "Q1", "symptom").await.unwrap();
        let (a2, _) = service.ask("uid-1", "Q2", "symptom").await.unwrap();

        let (reply, turns) = service.delete("uid-1", "Q1").await.unwrap();

        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].content, "Q2");
        assert_eq!(reply, a2);
    }

    #[tokio::test]
    async fn test_delete_unmatched_leaves_transcript() {
        let (service, db, _backend) = seeded_service(["A1"]).await;
        service.ask("uid-1", "Q1", "symptom").await.unwrap();

        let (_, turns) = service.delete("uid-1", "never asked").await.unwrap();

        assert_eq!(turns.len(), 2);
        let rows = transcript::load_turns(db.pool(), "uid-1").await.unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_everything_returns_sentinel() {
        let (service, _db, _backend) = seeded_service(["A1"]).await;
        service.ask("uid-1", "Q1", "symptom").await.unwrap();

        let (reply, turns) = service.delete("uid-1", "Q1").await.unwrap();

        assert!(turns.is_empty());
        assert_eq!(reply, assistant_core::HISTORY_UPDATED);
    }
}
