//! Errors raised by the two local stores.
//!
//! Kept separate from the network taxonomy in `quill-client`: configuration
//! and credential persistence never reach the network, and their failures
//! mean something different to a caller (fix the device, not the server).

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The configuration file could not be written or removed.
    #[error("configuration store failure: {0}")]
    Config(String),

    /// The platform secure store rejected a write or delete.
    #[error("credential store failure: {0}")]
    Credential(String),
}
