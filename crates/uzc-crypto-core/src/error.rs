//! Error types for the UZC crypto core.

use thiserror::Error;

/// Errors raised by core primitives.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Wrong byte length, malformed hex, or an otherwise unusable input.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Address text that does not decode to an account id.
    #[error("decode failure: {0}")]
    DecodeFailure(String),
}

impl CoreError {
    pub(crate) fn length(what: &str, expected: usize, got: usize) -> Self {
        CoreError::InvalidArgument(format!("{what}: expected {expected} bytes, got {got}"))
    }
}

impl From<hex::FromHexError> for CoreError {
    fn from(e: hex::FromHexError) -> Self {
        CoreError::InvalidArgument(format!("malformed hex: {e}"))
    }
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
