//! Static file serving.
//!
//! Files under the configured static directory are served as-is under
//! `/static` (stylesheets, scripts, the canvas demo). Misses fall through
//! to the not-found page.

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::handler::Handler;
use tower_http::services::ServeDir;

use crate::handlers;
use crate::state::AppState;

/// Create the `/static` router.
pub(crate) fn static_router(static_dir: &Path, state: Arc<AppState>) -> Router<Arc<AppState>> {
    let not_found = handlers::pages::not_found.with_state(state);
    Router::new().nest_service(
        "/static",
        ServeDir::new(static_dir).not_found_service(not_found),
    )
}
