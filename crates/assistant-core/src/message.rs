//! Role-tagged chat messages and completion requests.

use serde::{Deserialize, Serialize};

/// A chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role: "system", "user", or "assistant"
    pub role: String,
    /// Message content
    pub content: String,
}

impl ChatMessage {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// A single completion request.
///
/// The system instruction is kept separate from the conversation so a
/// backend can place it wherever its wire format expects.
#[derive(Debug, Clone, Default)]
pub struct CompletionRequest {
    /// Optional system instruction, prepended ahead of `messages`.
    pub system: Option<String>,
    /// Ordered conversation messages, oldest first.
    pub messages: Vec<ChatMessage>,
    /// Per-request max token override.
    pub max_tokens: Option<u32>,
    /// Per-request temperature override.
    pub temperature: Option<f32>,
}

impl CompletionRequest {
    /// Create a request with a single user message.
    pub fn from_user(content: impl Into<String>) -> Self {
        Self {
            messages: vec![ChatMessage::user(content)],
            ..Self::default()
        }
    }

    /// Set the system instruction.
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// The content of the most recent user message, if any.
    pub fn last_user_text(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|msg| msg.role == "user")
            .map(|msg| msg.content.as_str())
    }
}
