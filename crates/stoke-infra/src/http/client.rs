//! reqwest-backed implementation of the posts transport.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, Url};

use stoke_core::domain::Post;
use stoke_core::ports::{PostTransport, SubmitPayload, SubmitReceipt, TransportError};
use stoke_shared::ErrorResponse;

/// Longest raw error body kept as a failure detail.
const MAX_DETAIL_LEN: usize = 200;

/// HTTP transport configuration.
#[derive(Debug, Clone)]
pub struct HttpTransportConfig {
    /// Scheme, host and port of the API, e.g. `https://list.example.org`.
    pub base_url: String,
    /// Collection path; post ids are appended to it.
    pub posts_path: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            posts_path: "/api/posts/".to_string(),
            timeout: Duration::from_secs(15),
        }
    }
}

impl HttpTransportConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("API_BASE_URL").unwrap_or(defaults.base_url),
            posts_path: std::env::var("API_POSTS_PATH").unwrap_or(defaults.posts_path),
            timeout: std::env::var("API_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
        }
    }
}

/// Posts API client.
pub struct HttpPostTransport {
    client: Client,
    /// Collection URL without a trailing slash.
    collection: Url,
}

impl HttpPostTransport {
    pub fn new(config: HttpTransportConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let collection = collection_url(&config)?;
        Ok(Self { client, collection })
    }

    pub fn from_env() -> Result<Self, TransportError> {
        Self::new(HttpTransportConfig::from_env())
    }

    /// Collection URL, or the URL of one post when `id` is given.
    fn post_url(&self, id: Option<&str>) -> Url {
        let mut url = self.collection.clone();
        // `collection` was checked to carry a path in `new`.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(id.unwrap_or(""));
        }
        url
    }

    async fn read_receipt(response: Response) -> Result<SubmitReceipt, TransportError> {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        if !(200..300).contains(&status) {
            return Err(status_error(status, &body));
        }

        Ok(SubmitReceipt {
            status,
            body: serde_json::from_str(&body).ok(),
        })
    }
}

fn collection_url(config: &HttpTransportConfig) -> Result<Url, TransportError> {
    let invalid = || TransportError::Network(format!("invalid API base URL {}", config.base_url));

    let mut url = Url::parse(&config.base_url).map_err(|_| invalid())?;
    {
        let mut segments = url.path_segments_mut().map_err(|()| invalid())?;
        segments
            .pop_if_empty()
            .extend(config.posts_path.split('/').filter(|s| !s.is_empty()));
    }
    Ok(url)
}

/// Map a non-success answer to a transport error, keeping whatever the
/// backend said about it.
fn status_error(status: u16, body: &str) -> TransportError {
    let detail = ErrorResponse::parse(body)
        .map(|problem| problem.summary())
        .or_else(|| {
            let text = body.trim();
            (!text.is_empty()).then(|| text.chars().take(MAX_DETAIL_LEN).collect())
        });

    TransportError::Status { status, detail }
}

fn network(err: reqwest::Error) -> TransportError {
    TransportError::Network(err.to_string())
}

#[async_trait]
impl PostTransport for HttpPostTransport {
    async fn create_post(&self, payload: &SubmitPayload) -> Result<SubmitReceipt, TransportError> {
        let url = self.post_url(None);
        tracing::debug!(%url, "POST new post");

        let response = self
            .client
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(network)?;

        Self::read_receipt(response).await
    }

    async fn update_post(
        &self,
        id: &str,
        payload: &SubmitPayload,
        auth_token: &str,
    ) -> Result<SubmitReceipt, TransportError> {
        let url = self.post_url(Some(id));
        tracing::debug!(%url, "PUT post update");

        let response = self
            .client
            .put(url)
            .bearer_auth(auth_token)
            .json(payload)
            .send()
            .await
            .map_err(network)?;

        Self::read_receipt(response).await
    }

    async fn fetch_post(&self, id: &str) -> Result<Post, TransportError> {
        let url = self.post_url(Some(id));
        tracing::debug!(%url, "GET post");

        let response = self.client.get(url).send().await.map_err(network)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(network)?;

        if !(200..300).contains(&status) {
            return Err(status_error(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| TransportError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport(base_url: &str) -> HttpPostTransport {
        HttpPostTransport::new(HttpTransportConfig {
            base_url: base_url.to_string(),
            ..HttpTransportConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_post_urls() {
        let transport = transport("https://list.example.org/");
        assert_eq!(
            transport.post_url(None).as_str(),
            "https://list.example.org/api/posts/"
        );
        assert_eq!(
            transport.post_url(Some("64f0c2")).as_str(),
            "https://list.example.org/api/posts/64f0c2"
        );
    }

    #[test]
    fn test_post_id_is_a_single_encoded_segment() {
        let transport = transport("https://list.example.org");
        assert_eq!(
            transport.post_url(Some("a/b c")).as_str(),
            "https://list.example.org/api/posts/a%2Fb%20c"
        );
    }

    #[test]
    fn test_base_path_and_empty_posts_path() {
        let transport = HttpPostTransport::new(HttpTransportConfig {
            base_url: "https://list.example.org/v2/".to_string(),
            posts_path: String::new(),
            ..HttpTransportConfig::default()
        })
        .unwrap();
        assert_eq!(
            transport.post_url(None).as_str(),
            "https://list.example.org/v2/"
        );
        assert_eq!(
            transport.post_url(Some("42")).as_str(),
            "https://list.example.org/v2/42"
        );
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let result = HttpPostTransport::new(HttpTransportConfig {
            base_url: "not a url".to_string(),
            ..HttpTransportConfig::default()
        });
        assert!(matches!(result, Err(TransportError::Network(_))));
    }

    #[test]
    fn test_status_error_prefers_problem_details() {
        let err = status_error(
            422,
            r#"{"title":"Validation Failed","status":422,"detail":"title is required"}"#,
        );
        assert_eq!(
            err,
            TransportError::Status {
                status: 422,
                detail: Some("Validation Failed: title is required".to_string()),
            }
        );
    }

    #[test]
    fn test_status_error_falls_back_to_text() {
        let err = status_error(502, "  Bad Gateway \n");
        assert_eq!(
            err,
            TransportError::Status {
                status: 502,
                detail: Some("Bad Gateway".to_string()),
            }
        );

        let err = status_error(500, "");
        assert_eq!(
            err,
            TransportError::Status {
                status: 500,
                detail: None,
            }
        );
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_network_error() {
        let transport = transport("http://127.0.0.1:9");
        let result = transport
            .create_post(&SubmitPayload::new(Post::new("Lamp", "Brass")))
            .await;
        assert!(matches!(result, Err(TransportError::Network(_))));
    }
}
