//! DTOs for campaign administration endpoints.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use validator::Validate;

use crate::domain::entities::{Campaign, CampaignPatch, NewCampaign, RedirectMethod};

/// Request body for `POST /api/campaigns`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCampaignRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    /// Redirect technique for the campaign's URLs. Defaults to `direct`.
    pub redirect_method: Option<RedirectMethod>,

    /// Optional slug served under `/views/{custom_path}`.
    pub custom_path: Option<String>,

    /// Scales the click limit of URLs created under this campaign.
    /// Defaults to 1.
    pub click_multiplier: Option<Decimal>,

    /// Advertiser price per thousand clicks, in dollars. Defaults to 0.
    pub price_per_thousand_clicks: Option<Decimal>,

    #[serde(default)]
    pub auto_manage: bool,

    /// Campaign id on the external ad-delivery platform.
    pub platform_campaign_id: Option<String>,

    /// Minutes to wait before rechecking a spend pause (1-60, default 10).
    #[validate(range(min = 1, max = 60))]
    pub recheck_wait_minutes: Option<i32>,
}

impl From<CreateCampaignRequest> for NewCampaign {
    fn from(request: CreateCampaignRequest) -> Self {
        NewCampaign {
            name: request.name,
            redirect_method: request.redirect_method.unwrap_or(RedirectMethod::Direct),
            custom_path: request.custom_path,
            click_multiplier: request.click_multiplier.unwrap_or(Decimal::ONE),
            price_per_thousand_clicks: request
                .price_per_thousand_clicks
                .unwrap_or(Decimal::ZERO),
            auto_manage: request.auto_manage,
            platform_campaign_id: request.platform_campaign_id,
            recheck_wait_minutes: request.recheck_wait_minutes.unwrap_or(10),
        }
    }
}

/// Request body for `PATCH /api/campaigns/{id}`.
///
/// All fields are optional — only provided fields are changed.
///
/// # Nullable-field semantics
///
/// For `custom_path` and `platform_campaign_id`:
/// - **Absent** → leave existing value unchanged
/// - **`null`** → clear the field
/// - **Value** → set it
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCampaignRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,

    pub redirect_method: Option<RedirectMethod>,

    /// Slug. Absent = no change, null = clear, value = set.
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub custom_path: Option<Option<String>>,

    pub click_multiplier: Option<Decimal>,

    pub price_per_thousand_clicks: Option<Decimal>,

    pub auto_manage: Option<bool>,

    /// Platform link. Absent = no change, null = unlink, value = link.
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub platform_campaign_id: Option<Option<String>>,

    #[validate(range(min = 1, max = 60))]
    pub recheck_wait_minutes: Option<i32>,
}

impl From<UpdateCampaignRequest> for CampaignPatch {
    fn from(request: UpdateCampaignRequest) -> Self {
        CampaignPatch {
            name: request.name,
            redirect_method: request.redirect_method,
            custom_path: request.custom_path,
            click_multiplier: request.click_multiplier,
            price_per_thousand_clicks: request.price_per_thousand_clicks,
            auto_manage: request.auto_manage,
            platform_campaign_id: request.platform_campaign_id,
            recheck_wait_minutes: request.recheck_wait_minutes,
        }
    }
}

/// JSON representation of a campaign.
#[derive(Debug, Serialize)]
pub struct CampaignResponse {
    pub id: i64,
    pub name: String,
    pub redirect_method: RedirectMethod,
    pub custom_path: Option<String>,
    pub click_multiplier: Decimal,
    pub price_per_thousand_clicks: Decimal,
    pub auto_manage: bool,
    pub platform_campaign_id: Option<String>,
    pub recheck_wait_minutes: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Campaign> for CampaignResponse {
    fn from(campaign: Campaign) -> Self {
        Self {
            id: campaign.id,
            name: campaign.name,
            redirect_method: campaign.redirect_method,
            custom_path: campaign.custom_path,
            click_multiplier: campaign.click_multiplier,
            price_per_thousand_clicks: campaign.price_per_thousand_clicks,
            auto_manage: campaign.auto_manage,
            platform_campaign_id: campaign.platform_campaign_id,
            recheck_wait_minutes: campaign.recheck_wait_minutes,
            created_at: campaign.created_at,
            updated_at: campaign.updated_at,
        }
    }
}
