//! CLI error types.

use folio_articles::StoreError;
use folio_config::ConfigError;
use folio_server::ServerError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Store(#[from] StoreError),

    #[error("{0}")]
    Server(#[from] ServerError),

    #[error("Failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
}
