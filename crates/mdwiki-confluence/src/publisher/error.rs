//! Error types for publish operations.

use crate::error::ConfluenceError;

/// Error while publishing a document.
///
/// Any of these aborts the current document only.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    /// Confluence API error.
    #[error("Confluence API error: {0}")]
    Confluence(#[from] ConfluenceError),

    /// IO error reading a local image.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Document or image path that cannot be published.
    #[error("{0}")]
    Validation(String),
}
