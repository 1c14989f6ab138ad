//! Articles API endpoint.
//!
//! Returns the published article list as JSON.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use folio_articles::ArticleMeta;
use serde::Serialize;

use crate::state::AppState;

/// Response for GET /api/articles.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ArticlesResponse {
    /// Display date of the most recent article.
    last_published_date: Option<String>,
    /// Published articles, newest first.
    articles: Vec<ArticleMeta>,
}

/// Handle GET /api/articles.
pub(crate) async fn get_articles(State(state): State<Arc<AppState>>) -> Json<ArticlesResponse> {
    let store = state.router.store();
    Json(ArticlesResponse {
        last_published_date: store.last_published_date().map(str::to_owned),
        articles: store.all().to_vec(),
    })
}
