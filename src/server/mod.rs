//! HTTP API
//!
//! Exposes the analysis pipeline as a JSON POST endpoint:
//! - `POST /analyze-internal-links` (also served at `POST /`)
//! - `OPTIONS` on both paths for CORS preflight
//! - `GET /healthz`
//!
//! Every response carries permissive CORS headers. Failures are reported as
//! `400 { "success": false, "error": ... }`.

mod handlers;
pub mod types;

pub use types::{AnalysisData, ErrorBody, SuccessBody};

use crate::analysis::Analyzer;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;

/// Shared state of the HTTP service
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Analyzer,
}

impl AppState {
    pub fn new(analyzer: Analyzer) -> Self {
        Self { analyzer }
    }
}

/// Builds the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/analyze-internal-links",
            post(handlers::analyze).options(handlers::preflight),
        )
        .route("/", post(handlers::analyze).options(handlers::preflight))
        .route("/healthz", get(handlers::healthz))
        .layer(middleware::map_response(handlers::cors_headers))
        .with_state(state)
}

/// Serves the API on an already bound listener until the process stops
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!("Listening on http://{}", addr);
    }
    axum::serve(listener, router(state)).await
}
