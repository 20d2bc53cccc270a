//! Bearer-token identity resolution.
//!
//! Token verification is an external concern; the API only needs a
//! resolved user identifier (and an email, when the verifier knows one).

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

/// A verified caller identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedUser {
    /// Stable user identifier.
    pub user_id: String,
    /// Display email, when the verifier knows one.
    pub email: Option<String>,
}

/// Errors from identity resolution.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The credential is missing, malformed, or unknown.
    #[error("invalid credential")]
    InvalidCredential,

    /// The verification collaborator failed.
    #[error("verification failed: {0}")]
    Verification(String),
}

/// Resolves an opaque bearer credential to a user identity.
#[async_trait]
pub trait Identity: Send + Sync {
    /// Verify a bearer token, returning the caller it belongs to.
    async fn resolve(&self, token: &str) -> Result<ResolvedUser, AuthError>;
}

/// Identity resolver backed by an external HTTP verification endpoint.
///
/// POSTs `{"token": "..."}` and expects `{"userId": "...", "email": ...}`
/// back; any non-success status is treated as an invalid credential.
pub struct HttpIdentity {
    client: reqwest::Client,
    verify_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VerifyResponse {
    user_id: String,
    email: Option<String>,
}

impl HttpIdentity {
    /// Create a resolver for the given verification endpoint.
    pub fn new(verify_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            verify_url: verify_url.into(),
        }
    }
}

#[async_trait]
impl Identity for HttpIdentity {
    async fn resolve(&self, token: &str) -> Result<ResolvedUser, AuthError> {
        let response = self
            .client
            .post(&self.verify_url)
            .json(&serde_json::json!({ "token": token }))
            .send()
            .await
            .map_err(|e| AuthError::Verification(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AuthError::InvalidCredential);
        }

        let verified: VerifyResponse = response
            .json()
            .await
            .map_err(|e| AuthError::Verification(e.to_string()))?;

        Ok(ResolvedUser {
            user_id: verified.user_id,
            email: verified.email,
        })
    }
}

/// Identity resolver backed by a static token table.
///
/// Intended for development and tests; the table comes from a
/// `token:userId[:email]` comma-separated spec.
#[derive(Debug, Default)]
pub struct StaticIdentity {
    tokens: HashMap<String, ResolvedUser>,
}

impl StaticIdentity {
    /// Parse a `token:userId[:email]` comma-separated spec.
    ///
    /// Malformed entries are skipped with a warning rather than failing
    /// startup.
    pub fn from_spec(spec: &str) -> Self {
        let mut tokens = HashMap::new();

        for entry in spec.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let mut parts = entry.splitn(3, ':');
            let token = parts.next().unwrap_or_default();
            let user_id = parts.next().unwrap_or_default();
            if token.is_empty() || user_id.is_empty() {
                warn!("Skipping malformed identity entry: {}", entry);
                continue;
            }
            tokens.insert(
                token.to_string(),
                ResolvedUser {
                    user_id: user_id.to_string(),
                    email: parts.next().map(str::to_string),
                },
            );
        }

        Self { tokens }
    }
}

#[async_trait]
impl Identity for StaticIdentity {
    async fn resolve(&self, token: &str) -> Result<ResolvedUser, AuthError> {
        self.tokens
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidCredential)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_identity_resolves_known_token() {
        let identity = StaticIdentity::from_spec("tok-1:uid-1:a@example.com, tok-2:uid-2");

        let user = identity.resolve("tok-1").await.unwrap();
        assert_eq!(user.user_id, "uid-1");
        assert_eq!(user.email.as_deref(), Some("a@example.com"));

        let user = identity.resolve("tok-2").await.unwrap();
        assert_eq!(user.user_id, "uid-2");
        assert!(user.email.is_none());
    }

    #[tokio::test]
    async fn test_static_identity_rejects_unknown_token() {
        let identity = StaticIdentity::from_spec("tok-1:uid-1");
        let result = identity.resolve("nope").await;
        assert!(matches!(result, Err(AuthError::InvalidCredential)));
    }

    #[tokio::test]
    async fn test_static_identity_skips_malformed_entries() {
        let identity = StaticIdentity::from_spec("bad-entry,tok-1:uid-1,:missing");

        assert!(identity.resolve("bad-entry").await.is_err());
        assert!(identity.resolve("tok-1").await.is_ok());
    }
}
