//! Error types for the engine facade.

use thiserror::Error;
use uzc_crypto_core::CoreError;
use uzc_crypto_message::MessageError;
use uzc_crypto_plot::PlotError;

/// Errors that can occur in engine operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// Key, hash, address or conversion error.
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// Plot or deadline error.
    #[error("plot error: {0}")]
    Plot(#[from] PlotError),

    /// Message encryption error.
    #[error("message error: {0}")]
    Message(#[from] MessageError),

    /// Malformed input to a facade operation.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Coarse error category callers can match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Wrong length, out-of-range value or malformed encoding.
    InvalidArgument,
    /// Address text that does not decode.
    DecodeFailure,
    /// Decryption, decompression or text decoding failed.
    CipherFailure,
    /// A background worker failed.
    Internal,
}

impl CryptoError {
    /// The category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CryptoError::Core(CoreError::InvalidArgument(_)) => ErrorKind::InvalidArgument,
            CryptoError::Core(CoreError::DecodeFailure(_)) => ErrorKind::DecodeFailure,
            CryptoError::Plot(PlotError::InvalidArgument(_)) => ErrorKind::InvalidArgument,
            CryptoError::Plot(PlotError::Join(_)) => ErrorKind::Internal,
            CryptoError::Message(MessageError::InvalidArgument(_)) => ErrorKind::InvalidArgument,
            CryptoError::Message(MessageError::CipherFailure(_)) => ErrorKind::CipherFailure,
            CryptoError::InvalidArgument(_) => ErrorKind::InvalidArgument,
        }
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, CryptoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        let cases: [(CryptoError, ErrorKind); 7] = [
            (CoreError::InvalidArgument("x".into()).into(), ErrorKind::InvalidArgument),
            (CoreError::DecodeFailure("x".into()).into(), ErrorKind::DecodeFailure),
            (PlotError::InvalidArgument("x".into()).into(), ErrorKind::InvalidArgument),
            (PlotError::Join("x".into()).into(), ErrorKind::Internal),
            (MessageError::CipherFailure("x".into()).into(), ErrorKind::CipherFailure),
            (MessageError::InvalidArgument("x".into()).into(), ErrorKind::InvalidArgument),
            (CryptoError::InvalidArgument("x".into()), ErrorKind::InvalidArgument),
        ];
        for (error, kind) in cases {
            assert_eq!(error.kind(), kind, "{error}");
        }
    }

    #[test]
    fn test_display_includes_source() {
        let error: CryptoError = CoreError::DecodeFailure("checksum mismatch".into()).into();
        assert_eq!(error.to_string(), "core error: decode failure: checksum mismatch");
    }
}
