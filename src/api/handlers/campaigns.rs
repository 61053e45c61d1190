//! Handlers for campaign administration endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::campaign::{
    CampaignResponse, CreateCampaignRequest, UpdateCampaignRequest,
};
use crate::api::dto::stats::CampaignStatsResponse;
use crate::api::dto::url::{CreateUrlRequest, UrlResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a campaign.
///
/// # Endpoint
///
/// `POST /api/campaigns`
///
/// # Errors
///
/// Returns 400 Bad Request on validation failure and 409 Conflict when
/// the custom path is already taken.
pub async fn create_campaign_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateCampaignRequest>,
) -> Result<(StatusCode, Json<CampaignResponse>), AppError> {
    payload.validate()?;

    let campaign = state
        .campaign_service
        .create_campaign(payload.into())
        .await?;

    Ok((StatusCode::CREATED, Json(campaign.into())))
}

/// Lists all campaigns, newest first.
///
/// # Endpoint
///
/// `GET /api/campaigns`
pub async fn list_campaigns_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<CampaignResponse>>, AppError> {
    let campaigns = state.campaign_service.list_campaigns().await?;

    Ok(Json(campaigns.into_iter().map(Into::into).collect()))
}

/// Fetches one campaign.
///
/// # Endpoint
///
/// `GET /api/campaigns/{id}`
pub async fn get_campaign_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<CampaignResponse>, AppError> {
    let campaign = state.campaign_service.get_campaign(id).await?;

    Ok(Json(campaign.into()))
}

/// Partially updates a campaign.
///
/// # Endpoint
///
/// `PATCH /api/campaigns/{id}`
pub async fn update_campaign_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateCampaignRequest>,
) -> Result<Json<CampaignResponse>, AppError> {
    payload.validate()?;

    let campaign = state
        .campaign_service
        .update_campaign(id, payload.into())
        .await?;

    Ok(Json(campaign.into()))
}

/// Registers a URL under a campaign.
///
/// # Endpoint
///
/// `POST /api/campaigns/{id}/urls`
///
/// The stored click limit is the request's base limit scaled by the
/// campaign's click multiplier.
pub async fn create_url_handler(
    Path(campaign_id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<CreateUrlRequest>,
) -> Result<(StatusCode, Json<UrlResponse>), AppError> {
    payload.validate()?;

    let url = state
        .campaign_service
        .add_url(
            campaign_id,
            payload.name,
            payload.target_url,
            payload.click_limit,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(url.into())))
}

/// Click totals and remaining capacity for a campaign.
///
/// # Endpoint
///
/// `GET /api/campaigns/{id}/stats`
pub async fn campaign_stats_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<CampaignStatsResponse>, AppError> {
    let stats = state.campaign_service.campaign_stats(id).await?;

    Ok(Json(stats.into()))
}
