//! GroqCompletion implementation using the Groq API.

use assistant_core::{
    async_trait, ChatMessage, Completion, CompletionError, CompletionRequest,
};
use reqwest::Client;
use tracing::{debug, info};

use crate::api_types::{ApiError, ChatCompletionRequest, ChatCompletionResponse};
use crate::config::GroqConfig;

/// A completion backend that talks to Groq's chat completions API.
pub struct GroqCompletion {
    client: Client,
    config: GroqConfig,
}

impl GroqCompletion {
    /// Create a new GroqCompletion with the given configuration.
    pub fn new(config: GroqConfig) -> Result<Self, CompletionError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                CompletionError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        info!("GroqCompletion initialized with model: {}", config.model);

        Ok(Self { client, config })
    }

    /// Create a GroqCompletion from environment variables.
    ///
    /// See [`GroqConfig::from_env`] for the variables read.
    pub fn from_env() -> Result<Self, CompletionError> {
        let config = GroqConfig::from_env()?;
        Self::new(config)
    }

    /// Get the configuration.
    pub fn config(&self) -> &GroqConfig {
        &self.config
    }

    /// Flatten a request into the wire-format message list.
    fn build_messages(request: &CompletionRequest) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);
        if let Some(ref system) = request.system {
            messages.push(ChatMessage::system(system.clone()));
        }
        messages.extend(request.messages.iter().cloned());
        messages
    }
}

#[async_trait]
impl Completion for GroqCompletion {
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
        let url = format!("{}/v1/chat/completions", self.config.api_url);

        let body = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: Self::build_messages(&request),
            max_tokens: request.max_tokens.or(self.config.max_tokens),
            temperature: request.temperature.or(self.config.temperature),
        };

        debug!("Sending request to Groq API: {:?}", body);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| CompletionError::Network(format!("Failed to send request: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            // Prefer the structured API error message when present
            let message = match serde_json::from_str::<ApiError>(&error_text) {
                Ok(api_error) => api_error.error.message,
                Err(_) => error_text,
            };

            return Err(CompletionError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            CompletionError::Network(format!("Failed to parse response: {}", e))
        })?;

        if let Some(ref usage) = completion.usage {
            debug!(
                "Token usage - prompt: {}, completion: {}, total: {}",
                usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
            );
        }

        let content = completion
            .choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_string);

        content.ok_or(CompletionError::EmptyCompletion)
    }

    fn name(&self) -> &str {
        "GroqCompletion"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_name() {
        let config = GroqConfig::builder().api_key("test-key").build();
        let backend = GroqCompletion::new(config).unwrap();
        assert_eq!(backend.name(), "GroqCompletion");
    }

    #[test]
    fn test_build_messages_prepends_system() {
        let request = CompletionRequest::from_user("hi").with_system("be brief");
        let messages = GroqCompletion::build_messages(&request);

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[0].content, "be brief");
        assert_eq!(messages[1].role, "user");
    }

    #[test]
    fn test_build_messages_without_system() {
        let request = CompletionRequest::from_user("hi");
        let messages = GroqCompletion::build_messages(&request);

        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, "user");
    }

    #[test]
    fn test_empty_completion_parses_as_error() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":null},"finish_reason":"stop"}],"usage":null}"#;
        let parsed: ChatCompletionResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.choices[0].message.content.is_none());
    }
}
