//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /r/{campaign_id}/{url_id}`        - Direct redirect (public)
//! - `GET /r/bridge/{campaign_id}/{url_id}` - Bridge hop of a double refresh (public)
//! - `GET /views/{custom_path}`             - Custom slug redirect (public)
//! - `GET /c/{campaign_id}`                 - Campaign rotation redirect (public)
//! - `GET /health`                          - Health check (public)
//! - `/api/*`                               - Campaign administration
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{
    bridge_redirect_handler, custom_path_handler, direct_redirect_handler, health_handler,
    rotation_redirect_handler,
};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = Router::new()
        .route("/r/{campaign_id}/{url_id}", get(direct_redirect_handler))
        .route(
            "/r/bridge/{campaign_id}/{url_id}",
            get(bridge_redirect_handler),
        )
        .route("/views/{custom_path}", get(custom_path_handler))
        .route("/c/{campaign_id}", get(rotation_redirect_handler))
        .route("/health", get(health_handler))
        .nest("/api", api::routes::admin_routes())
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
