//! HTML page endpoints.
//!
//! Each handler asks the [`ArticleRouter`](folio_articles::ArticleRouter)
//! for a [`Page`] and renders it. Index and article pages carry an `ETag`
//! and honour `If-None-Match`; not-found pages are always sent in full.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use folio_articles::{NotFoundContext, Page};
use md5::{Digest, Md5};

use crate::state::AppState;
use crate::views;

/// Handle GET /.
pub(crate) async fn get_index(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Response {
    let page = state.router.index();
    render_page(&state, page, &headers).await
}

/// Handle GET /article/{*route}.
pub(crate) async fn get_article(
    Path(route): Path<String>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Response {
    // Metadata is read with std::fs, keep it off the async workers
    let lookup = {
        let state = Arc::clone(&state);
        tokio::task::spawn_blocking(move || state.router.article(&route)).await
    };
    let page = match lookup {
        Ok(page) => page,
        Err(e) => {
            tracing::error!(error = %e, "Article lookup task failed");
            state.router.not_found()
        }
    };
    render_page(&state, page, &headers).await
}

/// Fallback for every unmatched path.
pub(crate) async fn not_found(State(state): State<Arc<AppState>>) -> Response {
    render_not_found(&state.router.not_found_context())
}

async fn render_page(state: &AppState, page: Page, headers: &HeaderMap) -> Response {
    let html = match page {
        Page::Index(ctx) => views::index(&ctx).into_string(),
        Page::Article(ctx) => {
            let view_path = state.view_path(&ctx.content_view);
            match tokio::fs::read_to_string(&view_path).await {
                Ok(body) => views::article(&ctx, &body).into_string(),
                Err(e) => {
                    tracing::warn!(
                        path = %view_path.display(),
                        error = %e,
                        "Article body unavailable"
                    );
                    return render_not_found(&NotFoundContext {
                        last_published_date: Some(ctx.last_published_date),
                    });
                }
            }
        }
        Page::NotFound(ctx) => return render_not_found(&ctx),
    };

    let etag = compute_etag(&state.version, &html);
    if let Some(if_none_match) = headers.get(header::IF_NONE_MATCH)
        && if_none_match.as_bytes() == etag.as_bytes()
    {
        return StatusCode::NOT_MODIFIED.into_response();
    }

    (
        [
            (header::ETAG, etag),
            (header::CACHE_CONTROL, "public, max-age=60".to_owned()),
        ],
        Html(html),
    )
        .into_response()
}

fn render_not_found(ctx: &NotFoundContext) -> Response {
    (StatusCode::NOT_FOUND, Html(views::not_found(ctx).into_string())).into_response()
}

/// Compute `ETag` from version and content.
///
/// MD5 truncated to 64 bits (16 hex chars).
fn compute_etag(version: &str, content: &str) -> String {
    let hash = Md5::digest(format!("{version}:{content}").as_bytes());
    format!("\"{}\"", &hex::encode(hash)[..16])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_etag_includes_version() {
        assert_ne!(compute_etag("1.0.0", "page"), compute_etag("1.0.1", "page"));
    }

    #[test]
    fn test_compute_etag_includes_content() {
        assert_ne!(compute_etag("1.0.0", "page1"), compute_etag("1.0.0", "page2"));
    }

    #[test]
    fn test_compute_etag_format() {
        let etag = compute_etag("1.0.0", "page");

        assert!(etag.starts_with('"'));
        assert!(etag.ends_with('"'));
        assert_eq!(etag.len(), 18);
    }
}
