//! Error types for the plot calculator.

use thiserror::Error;

/// Errors from plot and deadline computations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlotError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("search worker failed: {0}")]
    Join(String),
}

/// Result type for plot operations.
pub type Result<T> = std::result::Result<T, PlotError>;
