//! In-memory posts backend - used for dry runs when no API is reachable.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use stoke_core::domain::Post;
use stoke_core::ports::{PostTransport, SubmitPayload, SubmitReceipt, TransportError};

/// In-memory posts store with the backend's acceptance rules.
///
/// Creation requires a verification token; updates require an auth token and
/// an existing id. Note: Data is lost on process restart.
pub struct InMemoryPostTransport {
    store: RwLock<HashMap<String, Post>>,
    submissions: RwLock<Vec<SubmitPayload>>,
}

impl InMemoryPostTransport {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
            submissions: RwLock::new(Vec::new()),
        }
    }

    /// Seed a stored post, assigning an id if it has none. Returns the id.
    pub async fn insert(&self, mut post: Post) -> String {
        let id = post
            .id
            .get_or_insert_with(|| Uuid::new_v4().to_string())
            .clone();
        self.store.write().await.insert(id.clone(), post);
        id
    }

    pub async fn get(&self, id: &str) -> Option<Post> {
        self.store.read().await.get(id).cloned()
    }

    /// Every payload received, accepted or not, in arrival order.
    pub async fn submissions(&self) -> Vec<SubmitPayload> {
        self.submissions.read().await.clone()
    }

    async fn record(&self, payload: &SubmitPayload) {
        self.submissions.write().await.push(payload.clone());
    }

    fn receipt(status: u16, post: &Post) -> Result<SubmitReceipt, TransportError> {
        let body = serde_json::to_value(post).map_err(|e| TransportError::Decode(e.to_string()))?;
        Ok(SubmitReceipt {
            status,
            body: Some(body),
        })
    }
}

impl Default for InMemoryPostTransport {
    fn default() -> Self {
        Self::new()
    }
}

fn rejected(status: u16, detail: &str) -> TransportError {
    TransportError::Status {
        status,
        detail: Some(detail.to_string()),
    }
}

#[async_trait]
impl PostTransport for InMemoryPostTransport {
    async fn create_post(&self, payload: &SubmitPayload) -> Result<SubmitReceipt, TransportError> {
        self.record(payload).await;

        if payload.verification_token.as_deref().is_none_or(str::is_empty) {
            return Err(rejected(400, "verification token missing"));
        }

        let mut post = payload.post.clone();
        post.id = Some(Uuid::new_v4().to_string());
        post.created_at = Some(Utc::now());

        let receipt = Self::receipt(201, &post)?;
        self.insert(post).await;
        Ok(receipt)
    }

    async fn update_post(
        &self,
        id: &str,
        payload: &SubmitPayload,
        auth_token: &str,
    ) -> Result<SubmitReceipt, TransportError> {
        self.record(payload).await;

        if auth_token.is_empty() {
            return Err(rejected(401, "authentication required"));
        }

        let mut store = self.store.write().await;
        let stored = store
            .get_mut(id)
            .ok_or_else(|| rejected(404, "post not found"))?;

        let mut updated = payload.post.clone();
        updated.id = stored.id.clone();
        updated.created_at = stored.created_at;
        updated.photo_file_size = stored.photo_file_size;
        if updated.email.is_none() {
            updated.email = stored.email.clone();
        }
        *stored = updated;

        Self::receipt(200, stored)
    }

    async fn fetch_post(&self, id: &str) -> Result<Post, TransportError> {
        self.get(id)
            .await
            .ok_or_else(|| rejected(404, "post not found"))
    }
}
