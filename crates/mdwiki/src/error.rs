//! CLI error types.

use mdwiki_config::ConfigError;
use mdwiki_confluence::PublishError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Publish(#[from] PublishError),

    /// Some documents failed; the count is in the message.
    #[error("{0}")]
    Incomplete(String),
}
