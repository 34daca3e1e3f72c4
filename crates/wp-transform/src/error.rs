//! Error types for cleaning transforms.

use thiserror::Error;

/// Errors raised while configuring a transform.
#[derive(Debug, Error)]
pub enum TransformError {
    /// The legacy encoding label is not a known WHATWG label.
    #[error("unknown legacy encoding label: {label}")]
    UnknownEncoding { label: String },
}

/// Result type for transform operations.
pub type Result<T> = std::result::Result<T, TransformError>;
