//! Admin API route configuration.

use crate::api::handlers::{
    campaign_stats_handler, create_campaign_handler, create_url_handler, delete_url_handler,
    get_campaign_handler, list_campaigns_handler, update_campaign_handler, update_url_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, patch, post},
};

/// Campaign and URL administration routes, nested under `/api`.
///
/// # Endpoints
///
/// - `GET    /campaigns`             - List campaigns
/// - `POST   /campaigns`             - Create a campaign
/// - `GET    /campaigns/{id}`        - Fetch a campaign
/// - `PATCH  /campaigns/{id}`        - Partially update a campaign
/// - `POST   /campaigns/{id}/urls`   - Register a URL under a campaign
/// - `GET    /campaigns/{id}/stats`  - Click totals and remaining capacity
/// - `PATCH  /urls/{id}`             - Partially update a tracked URL
/// - `DELETE /urls/{id}`             - Soft-delete a tracked URL
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/campaigns",
            get(list_campaigns_handler).post(create_campaign_handler),
        )
        .route(
            "/campaigns/{id}",
            get(get_campaign_handler).patch(update_campaign_handler),
        )
        .route("/campaigns/{id}/urls", post(create_url_handler))
        .route("/campaigns/{id}/stats", get(campaign_stats_handler))
        .route(
            "/urls/{id}",
            patch(update_url_handler).delete(delete_url_handler),
        )
}
