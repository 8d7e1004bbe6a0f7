//! Authentication session error types.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur while persisting a login session.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The backend issued an empty token.
    #[error("access token is empty")]
    EmptyToken,

    /// The user profile could not be serialized.
    #[error("failed to encode user profile: {0}")]
    Encode(#[from] serde_json::Error),

    /// Storage operation failed.
    #[error("session storage error: {0}")]
    Storage(#[from] StorageError),
}
