//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The panel endpoints and the webhook live under one Axum router. Anything
//! that does not match an API route falls through to the static page
//! directory, which hosts the panel markup and the `panels` wasm bundle.

pub mod api;
pub mod webhook;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let static_files = ServeDir::new(&state.config.static_dir).append_index_html_on_directories(true);

    Router::new()
        .route("/api/audit", get(api::run_audit))
        .route("/api/lean_check", get(api::run_lean_check))
        .route("/webhook", post(webhook::receive))
        .route("/healthz", get(healthz))
        .fallback_service(static_files)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
