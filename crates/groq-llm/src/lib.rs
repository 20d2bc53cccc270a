//! Groq-backed completion client.
//!
//! Implements the [`assistant_core::Completion`] trait against Groq's
//! OpenAI-compatible chat completions endpoint.
//!
//! # Example
//!
//! ```no_run
//! use assistant_core::{Completion, CompletionRequest};
//! use groq_llm::{GroqCompletion, GroqConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = GroqCompletion::from_env()?;
//!     let reply = backend
//!         .complete(CompletionRequest::from_user("Rate this meal: rice and dal"))
//!         .await?;
//!     println!("{}", reply);
//!     Ok(())
//! }
//! ```

mod api_types;
mod client;
mod config;

pub use client::GroqCompletion;
pub use config::GroqConfig;
