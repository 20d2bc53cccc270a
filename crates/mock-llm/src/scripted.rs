//! Scripted backend - returns queued replies in order.

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::Mutex;

use assistant_core::{Completion, CompletionError, CompletionRequest};

/// A backend that plays back a fixed script of replies.
///
/// Each call to `complete` pops the next queued reply and records the
/// request for later assertions. A call past the end of the script
/// returns [`CompletionError::EmptyCompletion`].
#[derive(Debug, Default)]
pub struct ScriptedCompletion {
    replies: Mutex<VecDeque<String>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedCompletion {
    /// Create a backend with the given replies, returned in order.
    pub fn new(replies: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue another reply.
    pub async fn push_reply(&self, reply: impl Into<String>) {
        self.replies.lock().await.push_back(reply.into());
    }

    /// All requests received so far, in order.
    pub async fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().await.clone()
    }

    /// Number of replies still queued.
    pub async fn remaining(&self) -> usize {
        self.replies.lock().await.len()
    }
}

#[async_trait]
impl Completion for ScriptedCompletion {
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
        self.requests.lock().await.push(request);

        self.replies
            .lock()
            .await
            .pop_front()
            .ok_or(CompletionError::EmptyCompletion)
    }

    fn name(&self) -> &str {
        "ScriptedCompletion"
    }
}
