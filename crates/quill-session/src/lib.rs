//! Session layer for the quill sync client
//!
//! This crate holds everything that outlives a single request: the
//! persisted connection settings, the secret credential, and the in-memory
//! entity snapshots the presentation layer renders from. The pieces are
//! deliberately small and separable — the configuration store knows nothing
//! about secrets, the vault knows nothing about files, and the session owns
//! a passed-in [`quill_client::StoreClient`] rather than a process-wide
//! singleton.
//!
//! A session is usable (`configured`) exactly when a non-empty host and a
//! non-empty credential are both present; this is evaluated from its inputs
//! on every configuration change, never cached on its own.

pub mod config;
pub mod error;
pub mod session;
pub mod vault;

pub use config::{ConfigurationStore, ServerConfiguration, DEFAULT_PORT};
pub use error::StoreError;
pub use session::{CommentProjection, SessionState};
pub use vault::{CredentialVault, KeyringVault, MemoryVault};
