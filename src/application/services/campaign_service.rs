//! Campaign and tracked-URL administration service.
//!
//! The operations the external admin surface calls: campaign CRUD, URL
//! registration with multiplier-adjusted limits, soft deletion, and click
//! statistics.

use std::sync::Arc;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde_json::json;

use crate::domain::entities::{
    Campaign, CampaignPatch, NewCampaign, NewUrl, TrackedUrl, UrlStatus,
};
use crate::domain::repositories::{CampaignRepository, UrlRepository};
use crate::error::AppError;
use crate::utils::slug::validate_custom_path;
use crate::utils::url_norm::normalize_target_url;

/// Click totals for one URL within a campaign stats report.
#[derive(Debug, Clone)]
pub struct UrlStats {
    pub url: TrackedUrl,
    pub remaining: i64,
}

/// Aggregated click statistics for a campaign.
#[derive(Debug, Clone)]
pub struct CampaignStats {
    pub campaign: Campaign,
    pub total_clicks: i64,
    pub total_limit: i64,
    pub active_remaining: i64,
    pub urls: Vec<UrlStats>,
}

/// Administrative operations over campaigns and their URLs.
pub struct CampaignService {
    campaigns: Arc<dyn CampaignRepository>,
    urls: Arc<dyn UrlRepository>,
}

impl CampaignService {
    /// Creates a new campaign service.
    pub fn new(campaigns: Arc<dyn CampaignRepository>, urls: Arc<dyn UrlRepository>) -> Self {
        Self { campaigns, urls }
    }

    /// Creates a campaign.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a malformed slug, negative
    /// pricing/multiplier, or an out-of-range recheck wait;
    /// [`AppError::Conflict`] when the slug is taken.
    pub async fn create_campaign(&self, new_campaign: NewCampaign) -> Result<Campaign, AppError> {
        if let Some(path) = &new_campaign.custom_path {
            validate_custom_path(path)?;
        }
        validate_pricing(
            new_campaign.click_multiplier,
            new_campaign.price_per_thousand_clicks,
        )?;
        validate_recheck_wait(new_campaign.recheck_wait_minutes)?;

        self.campaigns.create(new_campaign).await
    }

    /// Fetches a campaign by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when no campaign matches.
    pub async fn get_campaign(&self, id: i64) -> Result<Campaign, AppError> {
        self.campaigns
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Campaign not found", json!({"id": id})))
    }

    /// Lists all campaigns, newest first.
    pub async fn list_campaigns(&self) -> Result<Vec<Campaign>, AppError> {
        self.campaigns.list().await
    }

    /// Partially updates a campaign.
    ///
    /// The multiplier of existing URLs is not retroactively applied; a
    /// changed multiplier affects URLs created afterwards.
    ///
    /// # Errors
    ///
    /// Same validation errors as [`create_campaign`](Self::create_campaign),
    /// plus [`AppError::NotFound`] for an unknown id.
    pub async fn update_campaign(
        &self,
        id: i64,
        patch: CampaignPatch,
    ) -> Result<Campaign, AppError> {
        if let Some(Some(path)) = &patch.custom_path {
            validate_custom_path(path)?;
        }
        if let Some(multiplier) = patch.click_multiplier {
            if multiplier < Decimal::ZERO {
                return Err(AppError::bad_request(
                    "Click multiplier must not be negative",
                    json!({"click_multiplier": multiplier.to_string()}),
                ));
            }
        }
        if let Some(price) = patch.price_per_thousand_clicks {
            if price < Decimal::ZERO {
                return Err(AppError::bad_request(
                    "Price per thousand clicks must not be negative",
                    json!({"price_per_thousand_clicks": price.to_string()}),
                ));
            }
        }
        if let Some(wait) = patch.recheck_wait_minutes {
            validate_recheck_wait(wait)?;
        }

        self.campaigns.update(id, patch).await
    }

    /// Registers a URL under a campaign.
    ///
    /// The stored click limit is the requested base limit scaled by the
    /// campaign's click multiplier, rounded, and floored at 1. The target
    /// URL is normalized before storage.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown campaign and
    /// [`AppError::Validation`] for a bad target URL or limit.
    pub async fn add_url(
        &self,
        campaign_id: i64,
        name: String,
        target_url: String,
        base_click_limit: i64,
    ) -> Result<TrackedUrl, AppError> {
        if base_click_limit <= 0 {
            return Err(AppError::bad_request(
                "Click limit must be positive",
                json!({"click_limit": base_click_limit}),
            ));
        }

        let campaign = self.get_campaign(campaign_id).await?;

        let target_url = normalize_target_url(&target_url).map_err(|e| {
            AppError::bad_request("Invalid target URL", json!({"reason": e.to_string()}))
        })?;

        let click_limit = effective_limit(base_click_limit, campaign.click_multiplier)?;

        self.urls
            .create(NewUrl {
                campaign_id,
                name,
                target_url,
                click_limit,
            })
            .await
    }

    /// Updates a URL's name, target, or status.
    ///
    /// Only `active` and `paused` can be set through this operation;
    /// deletion goes through [`delete_url`](Self::delete_url) and
    /// `completed` is reserved for the click accountant.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a disallowed status or bad
    /// target, [`AppError::NotFound`] for an unknown URL.
    pub async fn update_url(
        &self,
        id: i64,
        name: Option<String>,
        target_url: Option<String>,
        status: Option<UrlStatus>,
    ) -> Result<TrackedUrl, AppError> {
        let target_url = target_url
            .map(|raw| {
                normalize_target_url(&raw).map_err(|e| {
                    AppError::bad_request("Invalid target URL", json!({"reason": e.to_string()}))
                })
            })
            .transpose()?;

        if let Some(status) = status {
            if !matches!(status, UrlStatus::Active | UrlStatus::Paused) {
                return Err(AppError::bad_request(
                    "Status can only be set to active or paused",
                    json!({"status": status.as_str()}),
                ));
            }
        }

        let url = self.urls.update(id, name, target_url).await?;

        match status {
            Some(status) if status != url.status => {
                self.urls.set_status(id, status).await?;
                self.urls.find_by_id(id).await?.ok_or_else(|| {
                    AppError::not_found("URL not found", json!({"id": id}))
                })
            }
            _ => Ok(url),
        }
    }

    /// Soft-deletes a URL, removing it from rotation and accounting.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown URL.
    pub async fn delete_url(&self, id: i64) -> Result<(), AppError> {
        let deleted = self.urls.set_status(id, UrlStatus::Deleted).await?;
        if !deleted {
            return Err(AppError::not_found("URL not found", json!({"id": id})));
        }
        Ok(())
    }

    /// Click totals and remaining capacity for a campaign.
    ///
    /// Soft-deleted URLs are excluded; `active_remaining` counts active
    /// URLs only, matching what the scheduler sees.
    pub async fn campaign_stats(&self, campaign_id: i64) -> Result<CampaignStats, AppError> {
        let campaign = self.get_campaign(campaign_id).await?;
        let urls = self.urls.list_by_campaign(campaign_id).await?;

        let mut total_clicks = 0;
        let mut total_limit = 0;
        let mut active_remaining = 0;
        let mut rows = Vec::new();

        for url in urls {
            if url.status == UrlStatus::Deleted {
                continue;
            }
            total_clicks += url.clicks;
            total_limit += url.click_limit;
            if url.status == UrlStatus::Active {
                active_remaining += url.remaining();
            }
            rows.push(UrlStats {
                remaining: url.remaining(),
                url,
            });
        }

        Ok(CampaignStats {
            campaign,
            total_clicks,
            total_limit,
            active_remaining,
            urls: rows,
        })
    }
}

fn validate_pricing(multiplier: Decimal, price: Decimal) -> Result<(), AppError> {
    if multiplier < Decimal::ZERO {
        return Err(AppError::bad_request(
            "Click multiplier must not be negative",
            json!({"click_multiplier": multiplier.to_string()}),
        ));
    }
    if price < Decimal::ZERO {
        return Err(AppError::bad_request(
            "Price per thousand clicks must not be negative",
            json!({"price_per_thousand_clicks": price.to_string()}),
        ));
    }
    Ok(())
}

fn validate_recheck_wait(minutes: i32) -> Result<(), AppError> {
    if !(1..=60).contains(&minutes) {
        return Err(AppError::bad_request(
            "Recheck wait must be between 1 and 60 minutes",
            json!({"recheck_wait_minutes": minutes}),
        ));
    }
    Ok(())
}

/// Scales a base limit by the campaign multiplier, rounded, floored at 1.
fn effective_limit(base: i64, multiplier: Decimal) -> Result<i64, AppError> {
    let scaled = (Decimal::from(base) * multiplier).round();
    let limit = scaled.to_i64().ok_or_else(|| {
        AppError::bad_request(
            "Scaled click limit out of range",
            json!({"click_limit": base, "click_multiplier": multiplier.to_string()}),
        )
    })?;

    Ok(limit.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::RedirectMethod;
    use crate::domain::repositories::{MockCampaignRepository, MockUrlRepository};
    use chrono::Utc;

    fn campaign(multiplier: Decimal) -> Campaign {
        Campaign {
            id: 1,
            name: "spring-sale".to_string(),
            redirect_method: RedirectMethod::Direct,
            custom_path: None,
            click_multiplier: multiplier,
            price_per_thousand_clicks: Decimal::ZERO,
            auto_manage: false,
            platform_campaign_id: None,
            recheck_wait_minutes: 10,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn new_campaign() -> NewCampaign {
        NewCampaign {
            name: "spring-sale".to_string(),
            redirect_method: RedirectMethod::Direct,
            custom_path: None,
            click_multiplier: Decimal::ONE,
            price_per_thousand_clicks: Decimal::ZERO,
            auto_manage: false,
            platform_campaign_id: None,
            recheck_wait_minutes: 10,
        }
    }

    #[test]
    fn test_effective_limit_scaling() {
        assert_eq!(effective_limit(1_000, Decimal::new(25, 1)).unwrap(), 2_500);
        assert_eq!(effective_limit(1_000, Decimal::ONE).unwrap(), 1_000);
        // Rounds half away from zero.
        assert_eq!(effective_limit(3, Decimal::new(15, 1)).unwrap(), 5);
    }

    #[test]
    fn test_effective_limit_floors_at_one() {
        assert_eq!(effective_limit(10, Decimal::ZERO).unwrap(), 1);
        assert_eq!(effective_limit(1, Decimal::new(1, 2)).unwrap(), 1);
    }

    #[tokio::test]
    async fn test_create_campaign_rejects_bad_slug() {
        let service = CampaignService::new(
            Arc::new(MockCampaignRepository::new()),
            Arc::new(MockUrlRepository::new()),
        );

        let mut input = new_campaign();
        input.custom_path = Some("Bad Slug!".to_string());

        let err = service.create_campaign(input).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_create_campaign_rejects_negative_price() {
        let service = CampaignService::new(
            Arc::new(MockCampaignRepository::new()),
            Arc::new(MockUrlRepository::new()),
        );

        let mut input = new_campaign();
        input.price_per_thousand_clicks = Decimal::NEGATIVE_ONE;

        assert!(service.create_campaign(input).await.is_err());
    }

    #[tokio::test]
    async fn test_create_campaign_rejects_out_of_range_wait() {
        let service = CampaignService::new(
            Arc::new(MockCampaignRepository::new()),
            Arc::new(MockUrlRepository::new()),
        );

        for wait in [0, 61] {
            let mut input = new_campaign();
            input.recheck_wait_minutes = wait;
            assert!(service.create_campaign(input).await.is_err(), "wait={wait}");
        }
    }

    #[tokio::test]
    async fn test_add_url_applies_multiplier() {
        let mut campaigns = MockCampaignRepository::new();
        campaigns
            .expect_find_by_id()
            .returning(|_| Ok(Some(campaign(Decimal::new(25, 1)))));

        let mut urls = MockUrlRepository::new();
        urls.expect_create()
            .withf(|new_url| {
                new_url.click_limit == 2_500
                    && new_url.target_url == "https://shop.example.com/a"
            })
            .times(1)
            .returning(|new_url| {
                Ok(TrackedUrl {
                    id: 9,
                    campaign_id: new_url.campaign_id,
                    name: new_url.name,
                    target_url: new_url.target_url,
                    click_limit: new_url.click_limit,
                    clicks: 0,
                    status: UrlStatus::Active,
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                })
            });

        let service = CampaignService::new(Arc::new(campaigns), Arc::new(urls));
        let url = service
            .add_url(
                1,
                "landing-a".to_string(),
                "https://SHOP.example.com/a#frag".to_string(),
                1_000,
            )
            .await
            .unwrap();

        assert_eq!(url.click_limit, 2_500);
    }

    #[tokio::test]
    async fn test_add_url_unknown_campaign() {
        let mut campaigns = MockCampaignRepository::new();
        campaigns.expect_find_by_id().returning(|_| Ok(None));

        let service =
            CampaignService::new(Arc::new(campaigns), Arc::new(MockUrlRepository::new()));

        let err = service
            .add_url(9, "x".to_string(), "https://a.example.com".to_string(), 10)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_add_url_rejects_bad_target() {
        let mut campaigns = MockCampaignRepository::new();
        campaigns
            .expect_find_by_id()
            .returning(|_| Ok(Some(campaign(Decimal::ONE))));

        let service =
            CampaignService::new(Arc::new(campaigns), Arc::new(MockUrlRepository::new()));

        let err = service
            .add_url(1, "x".to_string(), "javascript:alert(1)".to_string(), 10)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_update_url_rejects_terminal_status() {
        let service = CampaignService::new(
            Arc::new(MockCampaignRepository::new()),
            Arc::new(MockUrlRepository::new()),
        );

        for status in [UrlStatus::Deleted, UrlStatus::Completed] {
            let err = service
                .update_url(1, None, None, Some(status))
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::Validation { .. }));
        }
    }

    #[tokio::test]
    async fn test_delete_url_soft_deletes() {
        let mut urls = MockUrlRepository::new();
        urls.expect_set_status()
            .withf(|id, status| *id == 4 && *status == UrlStatus::Deleted)
            .times(1)
            .returning(|_, _| Ok(true));

        let service =
            CampaignService::new(Arc::new(MockCampaignRepository::new()), Arc::new(urls));

        service.delete_url(4).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_url_not_found() {
        let mut urls = MockUrlRepository::new();
        urls.expect_set_status().returning(|_, _| Ok(false));

        let service =
            CampaignService::new(Arc::new(MockCampaignRepository::new()), Arc::new(urls));

        assert!(matches!(
            service.delete_url(4).await.unwrap_err(),
            AppError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_campaign_stats_excludes_deleted() {
        let mut campaigns = MockCampaignRepository::new();
        campaigns
            .expect_find_by_id()
            .returning(|_| Ok(Some(campaign(Decimal::ONE))));

        let mut urls = MockUrlRepository::new();
        urls.expect_list_by_campaign().returning(|_| {
            let make = |id, clicks, limit, status| TrackedUrl {
                id,
                campaign_id: 1,
                name: format!("landing-{id}"),
                target_url: format!("https://shop.example.com/{id}"),
                click_limit: limit,
                clicks,
                status,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            };
            Ok(vec![
                make(1, 300, 1_000, UrlStatus::Active),
                make(2, 50, 500, UrlStatus::Paused),
                make(3, 10, 100, UrlStatus::Deleted),
            ])
        });

        let service = CampaignService::new(Arc::new(campaigns), Arc::new(urls));
        let stats = service.campaign_stats(1).await.unwrap();

        assert_eq!(stats.total_clicks, 350);
        assert_eq!(stats.total_limit, 1_500);
        // Paused URL does not count toward active remaining.
        assert_eq!(stats.active_remaining, 700);
        assert_eq!(stats.urls.len(), 2);
    }
}
