//! Verifier that relays a token obtained outside the process.

use async_trait::async_trait;

use stoke_core::ports::{BotVerifier, VerificationError};

/// Hands out a pre-acquired verification token.
///
/// The token is handed out once; later requests fail as the backend would
/// reject a reused token anyway.
pub struct StaticTokenVerifier {
    token: tokio::sync::Mutex<Option<String>>,
}

impl StaticTokenVerifier {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: tokio::sync::Mutex::new(Some(token.into())),
        }
    }

    /// A verifier with no token; every request fails.
    pub fn empty() -> Self {
        Self {
            token: tokio::sync::Mutex::new(None),
        }
    }

    /// Read the token from `VERIFICATION_TOKEN`.
    pub fn from_env() -> Self {
        match std::env::var("VERIFICATION_TOKEN") {
            Ok(token) if !token.is_empty() => Self::new(token),
            _ => {
                tracing::warn!("VERIFICATION_TOKEN not set. New posts will fail verification.");
                Self::empty()
            }
        }
    }
}

#[async_trait]
impl BotVerifier for StaticTokenVerifier {
    async fn fetch_token(&self, action: &str) -> Result<String, VerificationError> {
        tracing::debug!(action, "Relaying verification token");
        self.token.lock().await.take().ok_or_else(|| {
            VerificationError::Unavailable(format!("no token available for action {action}"))
        })
    }
}
