//! HTTP implementation of the store client.

use std::sync::RwLock;

use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;

use quill_types::{
    normalize_post_content, Comment, CommentsEnvelope, CreatePostRequest, ModerateRequest, Post,
    PostsPage,
};

use crate::error::SyncError;
use crate::StoreClient;

/// Header carrying the credential on authenticated requests.
pub const API_KEY_HEADER: &str = "X-API-KEY";

/// Substituted for the response body when the server's error body cannot be
/// read as text.
const UNREADABLE_BODY: &str = "(unreadable response body)";

/// Connection target derived from the saved configuration.
///
/// `base_url` is `http://{host}:{port}`, or empty while no host is set.
/// Both fields must be non-empty for the client to be usable.
#[derive(Debug, Clone, Default)]
struct Endpoint {
    base_url: String,
    api_key: String,
}

impl Endpoint {
    fn is_configured(&self) -> bool {
        !self.base_url.is_empty() && !self.api_key.is_empty()
    }
}

/// Client for the remote content store over HTTP/JSON.
///
/// Holds a single connection pool for the life of the client; `configure`
/// swaps the endpoint without rebuilding the pool. The client itself never
/// retries and sets no timeout of its own — both belong to callers.
pub struct HttpStoreClient {
    http: reqwest::Client,
    endpoint: RwLock<Endpoint>,
}

impl HttpStoreClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: RwLock::new(Endpoint::default()),
        }
    }

    fn snapshot(&self) -> Result<Endpoint, SyncError> {
        let endpoint = self
            .endpoint
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone();
        if !endpoint.is_configured() {
            return Err(SyncError::NotConfigured);
        }
        Ok(endpoint)
    }

    /// Issues one request and classifies the outcome.
    ///
    /// Returns the raw body text of a 2xx response; every other outcome maps
    /// onto the [`SyncError`] taxonomy. The credential is attached only when
    /// `auth` is set, and is never logged.
    async fn dispatch(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<Value>,
        auth: bool,
    ) -> Result<String, SyncError> {
        let endpoint = self.snapshot()?;

        let mut url = reqwest::Url::parse(&format!("{}{}", endpoint.base_url, path))
            .map_err(|e| SyncError::InvalidUrl(e.to_string()))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        log::debug!("{} {}", method, url);

        let mut request = self
            .http
            .request(method, url)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json");
        if auth {
            request = request.header(API_KEY_HEADER, &endpoint.api_key);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SyncError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .unwrap_or_else(|_| UNREADABLE_BODY.to_string());

        if !status.is_success() {
            log::warn!("store request failed with status {}", status.as_u16());
            return Err(SyncError::Server {
                status: status.as_u16(),
                message: text,
            });
        }

        Ok(text)
    }

    fn decode<T: DeserializeOwned>(text: &str) -> Result<T, SyncError> {
        serde_json::from_str(text).map_err(|e| SyncError::Decode(e.to_string()))
    }
}

impl Default for HttpStoreClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StoreClient for HttpStoreClient {
    fn configure(&self, host: &str, port: u16, api_key: &str) {
        let host = host.trim();
        let base_url = if host.is_empty() {
            String::new()
        } else {
            format!("http://{}:{}", host, port)
        };
        let mut endpoint = self
            .endpoint
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *endpoint = Endpoint {
            base_url,
            api_key: api_key.to_string(),
        };
    }

    fn is_configured(&self) -> bool {
        self.endpoint
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .is_configured()
    }

    async fn list_posts(&self, page: u32, limit: u32) -> Result<PostsPage, SyncError> {
        let query = [("page", page.to_string()), ("limit", limit.to_string())];
        let text = self
            .dispatch(Method::GET, "/api/posts", &query, None, false)
            .await?;
        Self::decode(&text)
    }

    async fn get_post(&self, id: i64) -> Result<Post, SyncError> {
        let text = self
            .dispatch(Method::GET, &format!("/api/posts/{}", id), &[], None, false)
            .await?;
        Self::decode(&text)
    }

    async fn create_post(&self, content: &str) -> Result<Post, SyncError> {
        let content = normalize_post_content(content)?;
        let body = serde_json::to_value(CreatePostRequest { content })
            .map_err(|e| SyncError::Validation(e.to_string()))?;
        let text = self
            .dispatch(Method::POST, "/api/posts", &[], Some(body), true)
            .await?;
        Self::decode(&text)
    }

    async fn delete_post(&self, id: i64) -> Result<(), SyncError> {
        self.dispatch(Method::DELETE, &format!("/api/posts/{}", id), &[], None, true)
            .await?;
        Ok(())
    }

    async fn comments_for_post(&self, post_id: i64) -> Result<Vec<Comment>, SyncError> {
        let text = self
            .dispatch(
                Method::GET,
                &format!("/api/comments/post/{}", post_id),
                &[],
                None,
                false,
            )
            .await?;
        let envelope: CommentsEnvelope = Self::decode(&text)?;
        Ok(envelope.comments)
    }

    async fn pending_comments(&self) -> Result<Vec<Comment>, SyncError> {
        let text = self
            .dispatch(Method::GET, "/api/comments/pending", &[], None, true)
            .await?;
        let envelope: CommentsEnvelope = Self::decode(&text)?;
        Ok(envelope.comments)
    }

    async fn moderate_comment(&self, id: i64, approve: bool) -> Result<Comment, SyncError> {
        let body = serde_json::to_value(ModerateRequest { approve })
            .map_err(|e| SyncError::Validation(e.to_string()))?;
        let text = self
            .dispatch(
                Method::PUT,
                &format!("/api/comments/{}/moderate", id),
                &[],
                Some(body),
                true,
            )
            .await?;
        Self::decode(&text)
    }

    async fn delete_comment(&self, id: i64) -> Result<(), SyncError> {
        self.dispatch(
            Method::DELETE,
            &format!("/api/comments/{}", id),
            &[],
            None,
            true,
        )
        .await?;
        Ok(())
    }
}
