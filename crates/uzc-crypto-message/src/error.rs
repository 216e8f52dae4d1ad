//! Error types for message encryption.

use thiserror::Error;

/// Errors from the AES and compression layers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("cipher failure: {0}")]
    CipherFailure(String),
}

/// Result type for message operations.
pub type Result<T> = std::result::Result<T, MessageError>;
