//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! One API route plus a static frontend. The browser form under `/` posts
//! to `/generate-er-diagram` and renders the returned Mermaid source
//! client-side. CORS is wide open so the page also works from `file://`
//! during local development.

pub mod diagram;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Resolve the path to the static frontend directory.
fn static_dir() -> PathBuf {
    std::env::var("STATIC_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("static"))
}

/// API routes + static frontend at `/`.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let frontend = ServeDir::new(static_dir()).append_index_html_on_directories(true);

    Router::new()
        .route("/generate-er-diagram", post(diagram::generate))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
        .fallback_service(frontend)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
