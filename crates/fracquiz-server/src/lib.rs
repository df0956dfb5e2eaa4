//! fracquiz-server: the quiz engine over JSON/HTTP.
//!
//! Each session lives server-side under an opaque `answer_id`; clients only
//! ever see prompts, never canonical answers.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod state;

pub use state::{AppState, DEFAULT_MAX_SESSIONS, DEFAULT_SESSION_TTL};

pub fn create_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/question", post(handlers::create_question))
        .route("/answer", post(handlers::submit_answer))
        .route("/restart", post(handlers::restart))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(addr: SocketAddr, app_state: Arc<AppState>) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("fracquiz listening on {}", listener.local_addr()?);

    axum::serve(listener, create_router(app_state))
        .await
        .context("server error")
}
