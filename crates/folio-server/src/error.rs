//! Server error types.

use folio_articles::StoreError;

/// Error raised while starting or running the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Article content could not be loaded at startup.
    #[error("Failed to load articles: {0}")]
    Store(#[from] StoreError),

    /// Bind address is not a valid socket address.
    #[error("Invalid bind address {address}: {source}")]
    Address {
        /// The `host:port` string.
        address: String,
        /// Parse failure.
        #[source]
        source: std::net::AddrParseError,
    },

    /// Listener or connection I/O failure.
    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}
