//! Access log middleware.
//!
//! Every request produces one line, `<local time> | <client ip> | <url>`,
//! emitted through `tracing` and, when an access log file is configured,
//! appended to it from a detached task. Write failures never affect the
//! response.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::{ConnectInfo, Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use chrono::{DateTime, Local};
use tokio::io::AsyncWriteExt;

use crate::state::AppState;

/// Log the request, then hand it on.
pub(crate) async fn log_request(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Response {
    let client = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map_or_else(|| "-".to_owned(), |info| info.0.ip().to_string());
    let host = req
        .headers()
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("localhost");
    let path = req
        .uri()
        .path_and_query()
        .map_or("/", |pq| pq.as_str());
    let line = format_line(Local::now(), &client, &format!("http://{host}{path}"));

    tracing::info!(target: "folio::access", "{line}");

    if let Some(log_path) = state.access_log.clone() {
        tokio::spawn(append_line(log_path, line));
    }

    next.run(req).await
}

fn format_line(now: DateTime<Local>, client: &str, url: &str) -> String {
    format!("{} | {client} | {url}", now.format("%Y-%m-%d %H:%M:%S"))
}

async fn append_line(path: PathBuf, line: String) {
    let result = async {
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;
        file.write_all(format!("{line}\n").as_bytes()).await
    }
    .await;

    if let Err(e) = result {
        tracing::warn!(path = %path.display(), error = %e, "Failed to write access log");
    }
}
