//! Liveness endpoint
//!
//! Minimal HTTP responder so a hosting platform's health checks keep the
//! process alive. It shares nothing with the announcement data flow.

use anyhow::{Context, Result};
use axum::{Router, http::StatusCode, response::IntoResponse, routing::get};
use tracing::info;

/// GET / and GET /health
/// Liveness probe response
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Serve the liveness endpoint until the process exits
pub async fn serve(addr: &str) -> Result<()> {
    let app = Router::new()
        .route("/", get(health_check))
        .route("/health", get(health_check));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind liveness endpoint on {}", addr))?;

    info!("Liveness endpoint listening on {}", addr);

    axum::serve(listener, app)
        .await
        .context("liveness endpoint server failed")?;

    Ok(())
}
