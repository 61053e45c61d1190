//! Handlers for tracked-URL administration endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::url::{UpdateUrlRequest, UrlResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Partially updates a tracked URL.
///
/// # Endpoint
///
/// `PATCH /api/urls/{id}`
///
/// Status may only be switched between `active` and `paused` here;
/// deletion goes through the DELETE endpoint.
pub async fn update_url_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateUrlRequest>,
) -> Result<Json<UrlResponse>, AppError> {
    payload.validate()?;

    let url = state
        .campaign_service
        .update_url(id, payload.name, payload.target_url, payload.status)
        .await?;

    Ok(Json(url.into()))
}

/// Soft-deletes a tracked URL.
///
/// # Endpoint
///
/// `DELETE /api/urls/{id}`
///
/// The row stays in place with a `deleted` status so historical click
/// counts keep contributing to campaign stats.
pub async fn delete_url_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.campaign_service.delete_url(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
