//! The authoritative in-memory session.
//!
//! `SessionState` owns the answer to "is this app usable" plus the entity
//! snapshots the presentation layer renders from. Every content operation
//! follows the same shape: require a configured session, delegate to the
//! store client, reconcile the owned collection on success, and propagate
//! the error untouched on failure — the snapshot is never half-mutated.

use quill_client::{StoreClient, SyncError};
use quill_types::{Comment, Post};

use crate::config::{ConfigurationStore, DEFAULT_PORT};
use crate::error::StoreError;
use crate::vault::CredentialVault;

/// Which comment collection the session currently holds.
///
/// The two projections are mutually exclusive and reconcile moderation
/// differently: the pending queue drops an approved comment, a post thread
/// keeps it and shows the new state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentProjection {
    /// Unapproved comments across all posts.
    PendingQueue,
    /// Every comment on one post, approved or not.
    PostThread { post_id: i64 },
}

/// Single source of truth for one running session.
pub struct SessionState {
    config_store: ConfigurationStore,
    vault: Box<dyn CredentialVault>,
    client: Box<dyn StoreClient>,
    host: String,
    port: u16,
    configured: bool,
    posts: Vec<Post>,
    comments: Vec<Comment>,
    projection: Option<CommentProjection>,
}

impl SessionState {
    /// Restores the session from the two stores and wires up the client.
    ///
    /// The client is passed in, not reached through a global, so isolated
    /// sessions can coexist (and tests can substitute a fake).
    pub fn initialize(
        config_store: ConfigurationStore,
        vault: Box<dyn CredentialVault>,
        client: Box<dyn StoreClient>,
    ) -> Self {
        let config = config_store.load();
        let api_key = vault.load().unwrap_or_default();
        let configured = !config.host.is_empty() && !api_key.is_empty();
        if configured {
            client.configure(&config.host, config.port, &api_key);
            log::debug!("session restored for {}:{}", config.host, config.port);
        } else {
            log::debug!("session starts unconfigured");
        }
        Self {
            config_store,
            vault,
            client,
            host: config.host,
            port: config.port,
            configured,
            posts: Vec::new(),
            comments: Vec::new(),
            projection: None,
        }
    }

    pub fn configured(&self) -> bool {
        self.configured
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Posts in server order; never re-sorted locally.
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// The active comment collection, scoped by [`Self::projection`].
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn projection(&self) -> Option<CommentProjection> {
        self.projection
    }

    /// Writes through to both stores and reconfigures the client. This is
    /// the only path by which an unconfigured session becomes configured.
    pub fn save_configuration(
        &mut self,
        host: &str,
        port: u16,
        api_key: &str,
    ) -> Result<(), StoreError> {
        let host = host.trim();
        self.config_store.save(host, port)?;
        self.vault.save(api_key)?;
        self.client.configure(host, port, api_key);
        self.host = host.to_string();
        self.port = port;
        // Evaluated, never cached independently of its inputs.
        self.configured = !host.is_empty() && !api_key.is_empty();
        Ok(())
    }

    /// Wipes both stores and resets the in-memory view. Never contacts the
    /// server; remote content is untouched.
    pub fn clear_configuration(&mut self) -> Result<(), StoreError> {
        self.config_store.clear()?;
        self.vault.clear()?;
        self.client.configure("", DEFAULT_PORT, "");
        self.host = String::new();
        self.port = DEFAULT_PORT;
        self.configured = false;
        self.posts.clear();
        self.comments.clear();
        self.projection = None;
        Ok(())
    }

    fn require_configured(&self) -> Result<(), SyncError> {
        if self.configured {
            Ok(())
        } else {
            Err(SyncError::NotConfigured)
        }
    }

    /// Replaces the posts snapshot with one fetched page. Returns the
    /// server's total post count.
    pub async fn load_posts(&mut self, page: u32, limit: u32) -> Result<i64, SyncError> {
        self.require_configured()?;
        let fetched = self.client.list_posts(page, limit).await?;
        self.posts = fetched.posts;
        Ok(fetched.total_count)
    }

    /// Fetches one post for a detail view. Pass-through: no collection is
    /// reconciled.
    pub async fn get_post(&self, id: i64) -> Result<Post, SyncError> {
        self.require_configured()?;
        self.client.get_post(id).await
    }

    /// Creates a post on the server. The new post is not inserted into the
    /// local snapshot — callers re-fetch to pick up server ordering and
    /// pagination.
    pub async fn create_post(&mut self, content: &str) -> Result<Post, SyncError> {
        self.require_configured()?;
        self.client.create_post(content).await
    }

    pub async fn delete_post(&mut self, id: i64) -> Result<(), SyncError> {
        self.require_configured()?;
        self.client.delete_post(id).await?;
        // Removing an id that is no longer present is a no-op, not an error.
        self.posts.retain(|post| post.id != id);
        if self.projection == Some(CommentProjection::PostThread { post_id: id }) {
            // The thread belonged to the deleted post; nothing left to show.
            self.comments.clear();
            self.projection = None;
        }
        Ok(())
    }

    /// Loads the global moderation queue and makes it the active projection.
    pub async fn load_pending_comments(&mut self) -> Result<(), SyncError> {
        self.require_configured()?;
        let comments = self.client.pending_comments().await?;
        self.comments = comments;
        self.projection = Some(CommentProjection::PendingQueue);
        Ok(())
    }

    /// Loads one post's thread and makes it the active projection.
    pub async fn load_post_comments(&mut self, post_id: i64) -> Result<(), SyncError> {
        self.require_configured()?;
        let comments = self.client.comments_for_post(post_id).await?;
        self.comments = comments;
        self.projection = Some(CommentProjection::PostThread { post_id });
        Ok(())
    }

    /// Approves a comment and reconciles the active projection: removed
    /// from a pending queue, replaced in a post thread.
    pub async fn approve_comment(&mut self, id: i64) -> Result<Comment, SyncError> {
        self.require_configured()?;
        let updated = self.client.moderate_comment(id, true).await?;
        match self.projection {
            Some(CommentProjection::PendingQueue) => {
                self.comments.retain(|comment| comment.id != id);
            }
            Some(CommentProjection::PostThread { .. }) => {
                if let Some(slot) = self.comments.iter_mut().find(|comment| comment.id == id) {
                    *slot = updated.clone();
                }
            }
            None => {}
        }
        Ok(updated)
    }

    pub async fn delete_comment(&mut self, id: i64) -> Result<(), SyncError> {
        self.require_configured()?;
        self.client.delete_comment(id).await?;
        self.comments.retain(|comment| comment.id != id);
        Ok(())
    }
}
