//! Error type shared by every graphnet operation.

use thiserror::Error;

/// Errors raised by network construction, queries, prediction and training.
///
/// Every error is reported synchronously to the caller. A failing `train`
/// call is rejected before any weight of the network has been touched.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("{what} index {index} out of range (valid: 0..{len})")]
    IndexOutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },

    #[error("Dimension mismatch for {what}: expected {expected}, got {actual}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Configuration file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Render error: {0}")]
    Render(#[from] image::ImageError),
}

impl NetworkError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        NetworkError::InvalidConfiguration(message.into())
    }
}

/// Result type for this library.
pub type Result<T> = std::result::Result<T, NetworkError>;
