//! Error taxonomy for the sync layer.
//!
//! Every failure a caller can observe from the client or the session layer
//! is one of these variants. Errors are returned as values, never raised
//! through panics, and never recovered silently: the client performs no
//! retries, so a caller that wants a retry policy owns it entirely.

use quill_types::ContentError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    /// The session lacks a host or a credential. Raised before any network
    /// call is attempted.
    #[error("server connection is not configured")]
    NotConfigured,

    /// The configured host/port does not form a parseable address.
    #[error("invalid server address: {0}")]
    InvalidUrl(String),

    /// A request precondition failed locally (for example an empty or
    /// over-length post body). Raised before any network call.
    #[error("invalid request: {0}")]
    Validation(String),

    /// DNS, connection, or timeout failure below the HTTP layer.
    #[error("network failure: {0}")]
    Transport(String),

    /// The server answered outside 200-299. `message` carries the raw
    /// response body text, or a fallback literal when the body is unreadable.
    #[error("server returned {status}: {message}")]
    Server { status: u16, message: String },

    /// A 2xx response whose body does not match the expected shape.
    #[error("unexpected response shape: {0}")]
    Decode(String),
}

impl From<ContentError> for SyncError {
    fn from(err: ContentError) -> Self {
        SyncError::Validation(err.to_string())
    }
}
