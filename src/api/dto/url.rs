//! DTOs for tracked URL administration endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{TrackedUrl, UrlStatus};

/// Request body for `POST /api/campaigns/{id}/urls`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUrlRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    /// Advertiser destination (normalized before storage).
    #[validate(url(message = "Invalid URL format"))]
    pub target_url: String,

    /// Base click limit; the campaign multiplier is applied on top.
    #[validate(range(min = 1))]
    pub click_limit: i64,
}

/// Request body for `PATCH /api/urls/{id}`.
///
/// All fields are optional — only provided fields are changed. `status`
/// accepts `active` and `paused` only.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUrlRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,

    #[validate(url(message = "Invalid URL format"))]
    pub target_url: Option<String>,

    pub status: Option<UrlStatus>,
}

/// JSON representation of a tracked URL.
#[derive(Debug, Serialize)]
pub struct UrlResponse {
    pub id: i64,
    pub campaign_id: i64,
    pub name: String,
    pub target_url: String,
    pub click_limit: i64,
    pub clicks: i64,
    pub remaining: i64,
    pub status: UrlStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TrackedUrl> for UrlResponse {
    fn from(url: TrackedUrl) -> Self {
        let remaining = url.remaining();
        Self {
            id: url.id,
            campaign_id: url.campaign_id,
            name: url.name,
            target_url: url.target_url,
            click_limit: url.click_limit,
            clicks: url.clicks,
            remaining,
            status: url.status,
            created_at: url.created_at,
            updated_at: url.updated_at,
        }
    }
}
