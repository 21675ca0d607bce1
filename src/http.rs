//! The minimal HTTP read surface: an HTML shell plus a polled table
//! fragment. No websocket, no pagination, no auth — a browser GETs
//! `/update-table` on an interval and swaps it into the page.

use std::sync::Arc;

use axum::extract::State;
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::Router;
use tracing::info;

use crate::core::scanner::BoxStore;
use crate::error::Result;

const INDEX_HTML: &str = include_str!("../templates/index.html");

#[derive(Clone)]
struct AppState {
    boxes: Arc<BoxStore>,
}

async fn index() -> impl IntoResponse {
    Html(INDEX_HTML)
}

async fn update_table(State(state): State<AppState>) -> impl IntoResponse {
    Html(crate::core::read_api::render_fragment(&state.boxes))
}

fn router(boxes: Arc<BoxStore>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/update-table", get(update_table))
        .with_state(AppState { boxes })
}

/// Binds and serves the HTTP surface until the process is torn down.
/// Callers select the bind address from [`crate::app::config::ServerConfig`].
pub async fn serve(bind_addr: &str, boxes: Arc<BoxStore>) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!(%bind_addr, "http server listening");
    axum::serve(listener, router(boxes)).await?;
    Ok(())
}
