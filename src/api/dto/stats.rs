//! DTOs for campaign click statistics.

use serde::Serialize;

use crate::application::services::campaign_service::CampaignStats;
use crate::domain::entities::UrlStatus;

/// Per-URL totals within a stats report.
#[derive(Debug, Serialize)]
pub struct UrlStatsItem {
    pub id: i64,
    pub name: String,
    pub status: UrlStatus,
    pub clicks: i64,
    pub click_limit: i64,
    pub remaining: i64,
}

/// Click totals for a campaign, aggregate and per URL.
///
/// Soft-deleted URLs are excluded; `active_remaining` matches the value
/// the auto-management scheduler acts on.
#[derive(Debug, Serialize)]
pub struct CampaignStatsResponse {
    pub campaign_id: i64,
    pub total_clicks: i64,
    pub total_limit: i64,
    pub active_remaining: i64,
    pub urls: Vec<UrlStatsItem>,
}

impl From<CampaignStats> for CampaignStatsResponse {
    fn from(stats: CampaignStats) -> Self {
        Self {
            campaign_id: stats.campaign.id,
            total_clicks: stats.total_clicks,
            total_limit: stats.total_limit,
            active_remaining: stats.active_remaining,
            urls: stats
                .urls
                .into_iter()
                .map(|row| UrlStatsItem {
                    id: row.url.id,
                    name: row.url.name,
                    status: row.url.status,
                    clicks: row.url.clicks,
                    click_limit: row.url.click_limit,
                    remaining: row.remaining,
                })
                .collect(),
        }
    }
}
