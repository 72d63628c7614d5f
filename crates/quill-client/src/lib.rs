//! Client for the remote quill content store
//!
//! This crate owns the authenticated request/response protocol against a
//! user-operated content server: building requests from the configured
//! host/port/credential, attaching authentication where an operation
//! requires it, decoding response bodies into [`quill_types`] shapes, and
//! classifying every failure into the [`SyncError`] taxonomy. The client is
//! an explicitly owned, passed-in instance rather than a process-wide
//! singleton, so isolated sessions (and tests) can each hold their own.
//!
//! No retry, timeout, or cancellation policy lives here; callers own all
//! three. A caller that abandons an in-flight operation simply discards the
//! future's result.

use async_trait::async_trait;

pub mod error;
pub mod http_client;

pub use error::SyncError;
pub use http_client::{HttpStoreClient, API_KEY_HEADER};

use quill_types::{Comment, Post, PostsPage};

/// StoreClient trait for communicating with a quill content server.
///
/// All content operations fail with [`SyncError::NotConfigured`] while
/// either the host or the credential is empty, without touching the network.
#[async_trait]
pub trait StoreClient: Send + Sync {
    /// Rebuilds the base address (`http://{host}:{port}`) and credential.
    fn configure(&self, host: &str, port: u16, api_key: &str);

    /// True iff both the base address and the credential are non-empty.
    fn is_configured(&self) -> bool;

    /// Fetch one page of posts, in server order.
    async fn list_posts(&self, page: u32, limit: u32) -> Result<PostsPage, SyncError>;

    /// Fetch a single post by id.
    async fn get_post(&self, id: i64) -> Result<Post, SyncError>;

    /// Create a post from `content`. The body is trimmed and length-checked
    /// locally; an invalid body is rejected before any request is issued.
    async fn create_post(&self, content: &str) -> Result<Post, SyncError>;

    /// Delete a post by id.
    async fn delete_post(&self, id: i64) -> Result<(), SyncError>;

    /// Fetch all comments attached to one post, approved or not.
    async fn comments_for_post(&self, post_id: i64) -> Result<Vec<Comment>, SyncError>;

    /// Fetch the moderation queue: unapproved comments across all posts.
    async fn pending_comments(&self) -> Result<Vec<Comment>, SyncError>;

    /// Approve (or leave pending) a comment. Returns the updated comment.
    async fn moderate_comment(&self, id: i64, approve: bool) -> Result<Comment, SyncError>;

    /// Delete a comment by id.
    async fn delete_comment(&self, id: i64) -> Result<(), SyncError>;
}

/// Factory for creating StoreClient instances
pub struct StoreClientFactory;

impl StoreClientFactory {
    /// Create an HTTP client. The returned client is unconfigured until
    /// `configure` is called with a host and credential.
    pub fn create_http_client() -> Box<dyn StoreClient> {
        Box::new(HttpStoreClient::new())
    }
}

#[cfg(test)]
pub mod test_utils;
