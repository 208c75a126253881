//! Bot-verification port.

use async_trait::async_trait;

/// Action name the backend expects on post creation tokens.
pub const POST_ACTION: &str = "post";

/// Source of one-time proof-of-humanity tokens.
#[async_trait]
pub trait BotVerifier: Send + Sync {
    /// Fetch a fresh token scoped to `action`. Each token is single-use.
    async fn fetch_token(&self, action: &str) -> Result<String, VerificationError>;
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum VerificationError {
    #[error("Verifier unavailable: {0}")]
    Unavailable(String),

    #[error("Challenge rejected")]
    Rejected,
}
