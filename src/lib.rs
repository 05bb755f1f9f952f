//! SwiftRemit Library
//!
//! Re-exports modules for integration testing and external use.

pub mod api;
pub mod domain;
pub mod identity;
pub mod provisioning;
pub mod store;

// Modules used mainly by the binary
pub mod config;
pub mod db;
mod error;

use axum::{middleware, Router};
use tower_http::trace::TraceLayer;

pub use config::Config;
pub use error::{AppError, AppResult};

use api::AppState;

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    // Axum layers run in reverse order of addition: logging sees the
    // context the context middleware inserted.
    let api_router = api::create_router()
        .layer(middleware::from_fn(api::middleware::logging_middleware))
        .layer(middleware::from_fn(api::middleware::context_middleware));

    Router::new()
        // Health check
        .route("/health", axum::routing::get(health_check))
        .merge(api_router)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
