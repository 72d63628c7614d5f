//! Type definitions for the quill sync protocol
//!
//! This crate provides the shared contract between the sync client and the
//! remote content store, ensuring type-safe communication across the HTTP
//! boundary. Centralizing the entity and envelope definitions keeps the
//! client, the session layer, and any presentation consumer in agreement
//! about the wire shapes without duplicating serde attributes.
//!
//! ## Example
//!
//! ```rust
//! use quill_types::Post;
//!
//! let post: Post = serde_json::from_str(
//!     r#"{"id":1,"content":"hi","createdAt":1700000000000,"published":true,"commentCount":0}"#,
//! ).unwrap();
//!
//! assert_eq!(post.id, 1);
//! assert_eq!(post.comment_count, 0);
//! ```

pub mod content;
pub mod types;

pub use content::*;
pub use types::*;
