//! Entity and envelope types for the quill wire protocol.

use serde::{Deserialize, Serialize};

/// A published or draft post as returned by the server.
///
/// Identity is the server-assigned `id`; clients never mint their own.
/// `comment_count` is only refreshed by re-fetching the post — it is never
/// adjusted optimistically on the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Server-assigned identifier.
    pub id: i64,
    /// The post body.
    pub content: String,
    /// Creation time in epoch milliseconds.
    #[serde(rename = "createdAt")]
    pub created_at: i64,
    /// Whether the post is publicly visible.
    pub published: bool,
    /// Number of comments attached to this post.
    #[serde(rename = "commentCount")]
    pub comment_count: i64,
}

/// A reader comment attached to a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Server-assigned identifier.
    pub id: i64,
    /// The post this comment belongs to.
    #[serde(rename = "postId")]
    pub post_id: i64,
    /// Display name supplied by the commenter.
    #[serde(rename = "authorName")]
    pub author_name: String,
    /// The comment body.
    pub content: String,
    /// Creation time in epoch milliseconds.
    #[serde(rename = "createdAt")]
    pub created_at: i64,
    /// Whether a moderator has approved this comment. Transitions only via
    /// the moderate operation; there is no reject state distinct from delete.
    pub approved: bool,
}

/// One page of posts, in server-determined order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostsPage {
    /// The posts on this page. Order is authoritative and must not be
    /// re-sorted by clients.
    pub posts: Vec<Post>,
    /// Total number of posts on the server across all pages.
    #[serde(rename = "totalCount")]
    pub total_count: i64,
}

/// A list of comments, either one post's thread or the pending queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentsEnvelope {
    /// The comments, in server-determined order.
    pub comments: Vec<Comment>,
}

/// Request body for creating a post. Minimal field set by design.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePostRequest {
    /// The post body, already trimmed and length-checked.
    pub content: String,
}

/// Request body for moderating a comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModerateRequest {
    /// `true` approves the comment. There is no `false` reject path on the
    /// server; rejection is expressed as deletion.
    pub approve: bool,
}
