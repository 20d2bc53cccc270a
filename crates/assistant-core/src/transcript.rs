//! Per-user chat transcript with paired deletion.
//!
//! The transcript is a plain ordered log. Turns are appended in
//! chronological order and never reordered; persistence is the caller's
//! job after each mutation.

use serde::{Deserialize, Serialize};

use crate::message::ChatMessage;

/// Role string for user turns.
pub const USER_ROLE: &str = "user";

/// Role string for assistant turns.
pub const ASSISTANT_ROLE: &str = "assistant";

/// Reply returned by a delete when no assistant turn remains.
pub const HISTORY_UPDATED: &str = "History updated.";

/// A single turn in a transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// Role: "user" or "assistant"
    pub role: String,
    /// Turn content
    pub content: String,
    /// Question kind ("symptom", "medicine"); only set on user turns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl Turn {
    /// Create a user turn with an optional question kind.
    pub fn user(content: impl Into<String>, kind: Option<String>) -> Self {
        Self {
            role: USER_ROLE.to_string(),
            content: content.into(),
            kind,
        }
    }

    /// Create an assistant turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ASSISTANT_ROLE.to_string(),
            content: content.into(),
            kind: None,
        }
    }
}

/// An ordered, append-only chat log for one user.
///
/// Alternation of roles is a convention of how [`append_exchange`] is
/// used, not an enforced invariant; loaded transcripts are taken as-is.
///
/// [`append_exchange`]: ChatTranscript::append_exchange
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTranscript {
    turns: Vec<Turn>,
}

impl ChatTranscript {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a transcript from already-ordered turns.
    pub fn from_turns(turns: Vec<Turn>) -> Self {
        Self { turns }
    }

    /// All turns in chronological order.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Consume the transcript, yielding its turns.
    pub fn into_turns(self) -> Vec<Turn> {
        self.turns
    }

    /// Number of turns.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether the transcript has no turns.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// The last `n` turns as role-tagged messages, oldest first.
    ///
    /// The question kind is dropped; only role and content feed the
    /// completion context.
    pub fn context_window(&self, n: usize) -> Vec<ChatMessage> {
        let start = self.turns.len().saturating_sub(n);
        self.turns[start..]
            .iter()
            .map(|turn| ChatMessage {
                role: turn.role.clone(),
                content: turn.content.clone(),
            })
            .collect()
    }

    /// Append one user turn followed by its assistant reply.
    pub fn append_exchange(
        &mut self,
        user_content: impl Into<String>,
        kind: Option<String>,
        assistant_content: impl Into<String>,
    ) {
        self.turns.push(Turn::user(user_content, kind));
        self.turns.push(Turn::assistant(assistant_content));
    }

    /// Remove the first user turn matching `content`, paired with its reply.
    ///
    /// If the matched turn is immediately followed by an assistant turn,
    /// both are removed; otherwise only the user turn is. An unmatched
    /// content leaves the transcript unchanged.
    ///
    /// Returns the content of the last remaining assistant turn, or
    /// [`HISTORY_UPDATED`] when none remains; callers surface this as the
    /// current reply after a delete.
    pub fn delete_by_user_content(&mut self, content: &str) -> String {
        let matched = self
            .turns
            .iter()
            .position(|turn| turn.role == USER_ROLE && turn.content == content);

        if let Some(i) = matched {
            let paired = self
                .turns
                .get(i + 1)
                .is_some_and(|next| next.role == ASSISTANT_ROLE);
            if paired {
                self.turns.drain(i..=i + 1);
            } else {
                self.turns.remove(i);
            }
        }

        self.turns
            .iter()
            .rev()
            .find(|turn| turn.role == ASSISTANT_ROLE)
            .map(|turn| turn.content.clone())
            .unwrap_or_else(|| HISTORY_UPDATED.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ChatTranscript {
        let mut transcript = ChatTranscript::new();
        transcript.append_exchange("Q1", Some("symptom".to_string()), "A1");
        transcript.append_exchange("Q2", Some("medicine".to_string()), "A2");
        transcript
    }

    #[test]
    fn test_append_exchange_order() {
        let transcript = sample();

        assert_eq!(transcript.len(), 4);
        assert_eq!(transcript.turns()[0].role, USER_ROLE);
        assert_eq!(transcript.turns()[0].content, "Q1");
        assert_eq!(transcript.turns()[1].role, ASSISTANT_ROLE);
        assert_eq!(transcript.turns()[1].content, "A1");
    }

    #[test]
    fn test_context_window_drops_kind_keeps_order() {
        let transcript = sample();
        let window = transcript.context_window(3);

        assert_eq!(window.len(), 3);
        assert_eq!(window[0].role, ASSISTANT_ROLE);
        assert_eq!(window[0].content, "A1");
        assert_eq!(window[2].content, "A2");
    }

    #[test]
    fn test_context_window_larger_than_transcript() {
        let transcript = sample();
        assert_eq!(transcript.context_window(100).len(), 4);
    }

    #[test]
    fn test_context_window_does_not_mutate() {
        let transcript = sample();
        let before = transcript.clone();
        let _ = transcript.context_window(2);
        assert_eq!(transcript, before);
    }

    #[test]
    fn test_delete_removes_pair() {
        let mut transcript = sample();
        let reply = transcript.delete_by_user_content("Q1");

        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.turns()[0].content, "Q2");
        assert_eq!(transcript.turns()[1].content, "A2");
        assert_eq!(reply, "A2");
    }

    #[test]
    fn test_delete_trailing_user_turn_only() {
        let mut transcript = sample();
        transcript
            .turns
            .push(Turn::user("dangling", None));

        let reply = transcript.delete_by_user_content("dangling");

        assert_eq!(transcript.len(), 4);
        assert_eq!(reply, "A2");
    }

    #[test]
    fn test_delete_unmatched_is_noop() {
        let mut transcript = sample();
        let before = transcript.clone();

        let reply = transcript.delete_by_user_content("never asked");

        assert_eq!(transcript, before);
        assert_eq!(reply, "A2");
    }

    #[test]
    fn test_delete_last_pair_returns_sentinel() {
        let mut transcript = ChatTranscript::new();
        transcript.append_exchange("only", None, "reply");

        let reply = transcript.delete_by_user_content("only");

        assert!(transcript.is_empty());
        assert_eq!(reply, HISTORY_UPDATED);
    }

    #[test]
    fn test_delete_matches_first_occurrence() {
        let mut transcript = ChatTranscript::new();
        transcript.append_exchange("dup", None, "first reply");
        transcript.append_exchange("dup", None, "second reply");

        transcript.delete_by_user_content("dup");

        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.turns()[1].content, "second reply");
    }
}
