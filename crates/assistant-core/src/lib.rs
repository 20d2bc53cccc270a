//! Core trait and types for completion backends.
//!
//! This crate provides the shared interface between the Hebo services and
//! whatever LLM backend answers them. It defines:
//!
//! - [`Completion`] - The trait every completion backend implements
//! - [`ChatMessage`] / [`CompletionRequest`] - Role-tagged request types
//! - [`CompletionError`] - Error types for completion calls
//! - [`parse_health_reply`] - Total parser turning raw completions into
//!   structured health replies
//! - [`ChatTranscript`] - Ordered per-user chat log with paired deletion
//!
//! # Example
//!
//! ```rust
//! use assistant_core::{Completion, CompletionError, CompletionRequest};
//! use async_trait::async_trait;
//!
//! struct MyBackend;
//!
//! #[async_trait]
//! impl Completion for MyBackend {
//!     async fn complete(&self, _request: CompletionRequest) -> Result<String, CompletionError> {
//!         Ok("Hello!".to_string())
//!     }
//!
//!     fn name(&self) -> &str {
//!         "MyBackend"
//!     }
//! }
//! ```

mod error;
mod message;
mod parser;
mod trait_def;
mod transcript;

pub use error::CompletionError;
pub use message::{ChatMessage, CompletionRequest};
pub use parser::{parse_health_reply, HealthReply, UNPARSEABLE_REPLY};
pub use trait_def::Completion;
pub use transcript::{ChatTranscript, Turn, ASSISTANT_ROLE, HISTORY_UPDATED, USER_ROLE};

// Re-export async_trait for convenience
pub use async_trait::async_trait;
