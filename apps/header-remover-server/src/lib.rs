//! PDF Header Remover
//!
//! Finds repeated header text in the top band of each page of a PDF,
//! covers it with white redactions and returns the cleaned document.
//!
//! # Modules
//!
//! - `document`: Geometry, merge strategies and error types
//! - `redact`: Header detection and redaction pipeline
//! - `mupdf`: MuPDF-backed document and page implementations
//! - `routes`: HTTP handlers

pub mod config;
pub mod document;
pub mod error;
pub mod mupdf;
pub mod redact;
pub mod routes;
pub mod state;

use axum::{extract::DefaultBodyLimit, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use state::AppState;

/// Build the application router
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let body_limit = state.config().server.max_upload_bytes;

    Router::new()
        .merge(routes::health::router())
        .merge(routes::redact::router())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
