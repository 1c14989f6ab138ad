//! HTTP server for Folio.
//!
//! This crate serves a small article site with axum:
//! - `/` lists the published articles, newest first
//! - `/article/{route}` shows one article with previous/next links
//! - `/api/articles` returns the same list as JSON
//! - `/static/*` passes through files from the static directory
//!
//! Everything else renders the not-found page.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::path::PathBuf;
//! use folio_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         content_root: PathBuf::from("views"),
//!         ..ServerConfig::default()
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► axum router (folio-server)
//!                        │
//!                        ├─► page handlers ──► ArticleRouter ──► ArticleStore (immutable snapshot)
//!                        │         │
//!                        │         └─► maud views
//!                        │
//!                        └─► /static (tower-http ServeDir)
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod state;
mod static_files;
mod views;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use folio_articles::{ArticleRouter, ArticleStore, FilterPolicy, StoreOptions};
use folio_config::ArticleFilter;
use state::AppState;

pub use error::ServerError;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Directory holding one folder per article.
    pub content_root: PathBuf,
    /// Directory served under `/static`.
    pub static_dir: PathBuf,
    /// Metadata file name inside each article folder.
    pub meta_filename: String,
    /// Publication filter.
    pub filter: FilterPolicy,
    /// Access log file (`None` logs through tracing only).
    pub access_log: Option<PathBuf>,
    /// Application version (for `ETag` computation).
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 4991,
            content_root: PathBuf::from("views"),
            static_dir: PathBuf::from("static"),
            meta_filename: "meta.json".to_owned(),
            filter: FilterPolicy::default(),
            access_log: None,
            version: String::new(),
        }
    }
}

impl ServerConfig {
    /// Store options derived from this configuration.
    #[must_use]
    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            meta_filename: self.meta_filename.clone(),
            filter: self.filter.clone(),
        }
    }
}

/// Run the server.
///
/// Loads the article snapshot first; a content error aborts startup.
///
/// # Errors
///
/// Returns an error if the articles cannot be loaded or the server fails to start.
pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let store = ArticleStore::load(&config.content_root, &config.store_options())?;

    let state = Arc::new(AppState {
        router: ArticleRouter::new(Arc::new(store)),
        static_dir: config.static_dir.clone(),
        access_log: config.access_log.clone(),
        version: config.version.clone(),
    });

    let app = app::create_router(state);

    let address = format!("{}:{}", config.host, config.port);
    let addr = SocketAddr::from_str(&address)
        .map_err(|source| ServerError::Address { address, source })?;
    tracing::info!(address = %addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Map the configured article filter onto the store's policy.
#[must_use]
pub fn filter_policy(filter: &ArticleFilter) -> FilterPolicy {
    match filter {
        ArticleFilter::Excluded(routes) => FilterPolicy::Exclude(routes.clone()),
        ArticleFilter::Released(routes) => FilterPolicy::Include(routes.clone()),
    }
}

/// Create server configuration from Folio config.
#[must_use]
pub fn server_config_from_config(config: &folio_config::Config, version: String) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        content_root: config.content_resolved.root.clone(),
        static_dir: config.content_resolved.static_dir.clone(),
        meta_filename: config.content_resolved.meta_filename.clone(),
        filter: filter_policy(&config.filter),
        access_log: config.access_log.clone(),
        version,
    }
}
