//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `/api/*` - REST API for camps, speakers, and talks
//!
//! # Middleware
//!
//! - **Versioning** - Resolves and echoes the API version on every response
//! - **Tracing** - Structured request/response logging

use axum::{Router, middleware};

use crate::api::middleware::{tracing, version};
use crate::api::routes::api_routes;
use crate::state::AppState;

/// Builds the application router with all routes and middleware.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .layer(middleware::from_fn(version::layer))
        .layer(tracing::layer())
        .with_state(state)
}
