//! Transport port - create, update and fetch posts on the backend.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::Post;

/// Body sent to the backend on submit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmitPayload {
    #[serde(flatten)]
    pub post: Post,
    /// Bot-verification proof, attached on creation only.
    #[serde(
        rename = "g-recaptcha-response",
        skip_serializing_if = "Option::is_none"
    )]
    pub verification_token: Option<String>,
}

impl SubmitPayload {
    pub fn new(post: Post) -> Self {
        Self {
            post,
            verification_token: None,
        }
    }

    pub fn with_verification(mut self, token: impl Into<String>) -> Self {
        self.verification_token = Some(token.into());
        self
    }
}

/// Successful backend answer. The body is left for callers to interpret.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitReceipt {
    pub status: u16,
    pub body: Option<serde_json::Value>,
}

/// Post transport trait - abstraction over the backend API.
#[async_trait]
pub trait PostTransport: Send + Sync {
    /// Create a new post.
    async fn create_post(&self, payload: &SubmitPayload) -> Result<SubmitReceipt, TransportError>;

    /// Replace an existing post, authenticated by the session token.
    async fn update_post(
        &self,
        id: &str,
        payload: &SubmitPayload,
        auth_token: &str,
    ) -> Result<SubmitReceipt, TransportError>;

    /// Load a stored post, e.g. to seed the editor.
    async fn fetch_post(&self, id: &str) -> Result<Post, TransportError>;
}

/// Transport errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Backend answered {status}{}", suffix(.detail))]
    Status { status: u16, detail: Option<String> },

    #[error("Unreadable response: {0}")]
    Decode(String),
}

fn suffix(detail: &Option<String>) -> String {
    detail
        .as_deref()
        .map(|detail| format!(": {detail}"))
        .unwrap_or_default()
}
