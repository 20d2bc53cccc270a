//! The completion backend trait.

use async_trait::async_trait;

use crate::error::CompletionError;
use crate::message::CompletionRequest;

/// Trait implemented by every completion backend.
///
/// A backend receives one fully assembled request and returns one reply
/// string. Backends hold their own clients and configuration; callers
/// inject them as `Arc<dyn Completion>` at construction time.
#[async_trait]
pub trait Completion: Send + Sync {
    /// Run one completion round-trip.
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError>;

    /// Human-readable backend name for logging.
    fn name(&self) -> &str;
}
