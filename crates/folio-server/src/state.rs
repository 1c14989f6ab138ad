//! Application state.
//!
//! Shared state for all request handlers.

use std::path::PathBuf;

use folio_articles::ArticleRouter;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Request router over the immutable article snapshot.
    pub(crate) router: ArticleRouter,
    /// Directory served under `/static`.
    pub(crate) static_dir: PathBuf,
    /// Access log file (if enabled).
    pub(crate) access_log: Option<PathBuf>,
    /// Application version for `ETag` computation.
    pub(crate) version: String,
}

impl AppState {
    /// Path of an article body fragment for a `<route>/view` content view.
    pub(crate) fn view_path(&self, content_view: &str) -> PathBuf {
        self.router
            .store()
            .content_root()
            .join(format!("{content_view}.html"))
    }
}
