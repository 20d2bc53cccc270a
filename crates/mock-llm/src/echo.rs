//! Echo backend - echoes the last user message back.

use async_trait::async_trait;

use assistant_core::{Completion, CompletionError, CompletionRequest};

/// A backend that echoes the last user message.
///
/// Useful for testing message flow without any AI processing.
#[derive(Debug, Clone, Default)]
pub struct EchoCompletion {
    /// Optional prefix to add before the echo.
    prefix: Option<String>,
}

impl EchoCompletion {
    /// Create a new EchoCompletion with no prefix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new EchoCompletion with a custom prefix.
    ///
    /// # Example
    ///
    /// ```rust
    /// use mock_llm::EchoCompletion;
    ///
    /// let backend = EchoCompletion::with_prefix("Echo: ");
    /// // Will respond with "Echo: <last user message>"
    /// ```
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }
}

#[async_trait]
impl Completion for EchoCompletion {
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
        let text = request.last_user_text().unwrap_or_default();

        Ok(match &self.prefix {
            Some(prefix) => format!("{}{}", prefix, text),
            None => text.to_string(),
        })
    }

    fn name(&self) -> &str {
        "EchoCompletion"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_echo_no_prefix() {
        let backend = EchoCompletion::new();
        let reply = backend
            .complete(CompletionRequest::from_user("Hello!"))
            .await
            .unwrap();
        assert_eq!(reply, "Hello!");
    }

    #[tokio::test]
    async fn test_echo_with_prefix() {
        let backend = EchoCompletion::with_prefix("Echo: ");
        let reply = backend
            .complete(CompletionRequest::from_user("Hello!"))
            .await
            .unwrap();
        assert_eq!(reply, "Echo: Hello!");
    }

    #[tokio::test]
    async fn test_backend_name() {
        assert_eq!(EchoCompletion::new().name(), "EchoCompletion");
    }
}
