//! In-memory repository implementations.
//!
//! Same contracts as the PostgreSQL repositories over `tokio::sync::RwLock`
//! maps, including the single-critical-section click increment. They back
//! integration tests and local experiments that should not need a database.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

use crate::domain::entities::{
    BudgetLogEntry, Campaign, CampaignPatch, ClickRecord, NewBudgetLogEntry, NewCampaign,
    NewClick, NewUrl, SpendPause, TrackedUrl, UrlStatus,
};
use crate::domain::repositories::{
    BudgetLogRepository, CampaignRepository, ClickLogRepository, ClickOutcome, PauseRepository,
    UrlRepository,
};
use crate::error::AppError;

#[derive(Default)]
struct CampaignStore {
    next_id: i64,
    rows: BTreeMap<i64, Campaign>,
}

/// In-memory campaign repository.
#[derive(Default)]
pub struct MemoryCampaignRepository {
    inner: RwLock<CampaignStore>,
}

impl MemoryCampaignRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CampaignRepository for MemoryCampaignRepository {
    async fn create(&self, new_campaign: NewCampaign) -> Result<Campaign, AppError> {
        let mut store = self.inner.write().await;

        if let Some(path) = &new_campaign.custom_path {
            if store
                .rows
                .values()
                .any(|c| c.custom_path.as_deref() == Some(path.as_str()))
            {
                return Err(AppError::conflict(
                    "Custom path already exists",
                    json!({"custom_path": path}),
                ));
            }
        }

        store.next_id += 1;
        let now = Utc::now();
        let campaign = Campaign {
            id: store.next_id,
            name: new_campaign.name,
            redirect_method: new_campaign.redirect_method,
            custom_path: new_campaign.custom_path,
            click_multiplier: new_campaign.click_multiplier,
            price_per_thousand_clicks: new_campaign.price_per_thousand_clicks,
            auto_manage: new_campaign.auto_manage,
            platform_campaign_id: new_campaign.platform_campaign_id,
            recheck_wait_minutes: new_campaign.recheck_wait_minutes,
            created_at: now,
            updated_at: now,
        };
        store.rows.insert(campaign.id, campaign.clone());

        Ok(campaign)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Campaign>, AppError> {
        Ok(self.inner.read().await.rows.get(&id).cloned())
    }

    async fn find_by_custom_path(
        &self,
        custom_path: &str,
    ) -> Result<Option<Campaign>, AppError> {
        Ok(self
            .inner
            .read()
            .await
            .rows
            .values()
            .find(|c| c.custom_path.as_deref() == Some(custom_path))
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Campaign>, AppError> {
        let store = self.inner.read().await;
        let mut campaigns: Vec<Campaign> = store.rows.values().cloned().collect();
        campaigns.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(campaigns)
    }

    async fn list_auto_managed(&self) -> Result<Vec<Campaign>, AppError> {
        Ok(self
            .inner
            .read()
            .await
            .rows
            .values()
            .filter(|c| c.is_auto_managed())
            .cloned()
            .collect())
    }

    async fn update(&self, id: i64, patch: CampaignPatch) -> Result<Campaign, AppError> {
        let mut store = self.inner.write().await;

        if let Some(Some(path)) = &patch.custom_path {
            if store
                .rows
                .values()
                .any(|c| c.id != id && c.custom_path.as_deref() == Some(path.as_str()))
            {
                return Err(AppError::conflict(
                    "Custom path already exists",
                    json!({"custom_path": path}),
                ));
            }
        }

        let campaign = store
            .rows
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("Campaign not found", json!({"id": id})))?;

        if let Some(name) = patch.name {
            campaign.name = name;
        }
        if let Some(method) = patch.redirect_method {
            campaign.redirect_method = method;
        }
        if let Some(custom_path) = patch.custom_path {
            campaign.custom_path = custom_path;
        }
        if let Some(multiplier) = patch.click_multiplier {
            campaign.click_multiplier = multiplier;
        }
        if let Some(price) = patch.price_per_thousand_clicks {
            campaign.price_per_thousand_clicks = price;
        }
        if let Some(auto_manage) = patch.auto_manage {
            campaign.auto_manage = auto_manage;
        }
        if let Some(platform_id) = patch.platform_campaign_id {
            campaign.platform_campaign_id = platform_id;
        }
        if let Some(wait) = patch.recheck_wait_minutes {
            campaign.recheck_wait_minutes = wait;
        }
        campaign.updated_at = Utc::now();

        Ok(campaign.clone())
    }
}

#[derive(Default)]
struct UrlStore {
    next_id: i64,
    rows: BTreeMap<i64, TrackedUrl>,
}

/// In-memory tracked URL repository.
///
/// `register_click` runs under a single write lock, giving it the same
/// all-or-nothing semantics as the guarded SQL UPDATE.
#[derive(Default)]
pub struct MemoryUrlRepository {
    inner: RwLock<UrlStore>,
}

impl MemoryUrlRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UrlRepository for MemoryUrlRepository {
    async fn create(&self, new_url: NewUrl) -> Result<TrackedUrl, AppError> {
        let mut store = self.inner.write().await;
        store.next_id += 1;
        let now = Utc::now();
        let url = TrackedUrl {
            id: store.next_id,
            campaign_id: new_url.campaign_id,
            name: new_url.name,
            target_url: new_url.target_url,
            click_limit: new_url.click_limit,
            clicks: 0,
            status: UrlStatus::Active,
            created_at: now,
            updated_at: now,
        };
        store.rows.insert(url.id, url.clone());

        Ok(url)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<TrackedUrl>, AppError> {
        Ok(self.inner.read().await.rows.get(&id).cloned())
    }

    async fn list_by_campaign(&self, campaign_id: i64) -> Result<Vec<TrackedUrl>, AppError> {
        Ok(self
            .inner
            .read()
            .await
            .rows
            .values()
            .filter(|u| u.campaign_id == campaign_id)
            .cloned()
            .collect())
    }

    async fn list_active_by_campaign(
        &self,
        campaign_id: i64,
    ) -> Result<Vec<TrackedUrl>, AppError> {
        Ok(self
            .inner
            .read()
            .await
            .rows
            .values()
            .filter(|u| u.campaign_id == campaign_id && u.status == UrlStatus::Active)
            .cloned()
            .collect())
    }

    async fn register_click(&self, id: i64) -> Result<ClickOutcome, AppError> {
        let mut store = self.inner.write().await;

        let Some(url) = store.rows.get_mut(&id) else {
            return Ok(ClickOutcome::NotFound);
        };

        if url.status != UrlStatus::Active || url.clicks >= url.click_limit {
            return Ok(ClickOutcome::Exhausted);
        }

        url.clicks += 1;
        let completed = url.clicks >= url.click_limit;
        if completed {
            url.status = UrlStatus::Completed;
        }
        url.updated_at = Utc::now();

        Ok(ClickOutcome::Registered {
            clicks: url.clicks,
            completed,
        })
    }

    async fn active_remaining(&self, campaign_id: i64) -> Result<i64, AppError> {
        Ok(self
            .inner
            .read()
            .await
            .rows
            .values()
            .filter(|u| u.campaign_id == campaign_id && u.status == UrlStatus::Active)
            .map(|u| u.remaining())
            .sum())
    }

    async fn update(
        &self,
        id: i64,
        name: Option<String>,
        target_url: Option<String>,
    ) -> Result<TrackedUrl, AppError> {
        let mut store = self.inner.write().await;
        let url = store
            .rows
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("URL not found", json!({"id": id})))?;

        if let Some(name) = name {
            url.name = name;
        }
        if let Some(target_url) = target_url {
            url.target_url = target_url;
        }
        url.updated_at = Utc::now();

        Ok(url.clone())
    }

    async fn set_status(&self, id: i64, status: UrlStatus) -> Result<bool, AppError> {
        let mut store = self.inner.write().await;
        match store.rows.get_mut(&id) {
            Some(url) => {
                url.status = status;
                url.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// In-memory spend-pause repository.
#[derive(Default)]
pub struct MemoryPauseRepository {
    inner: RwLock<HashMap<String, SpendPause>>,
}

impl MemoryPauseRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PauseRepository for MemoryPauseRepository {
    async fn upsert(&self, pause: SpendPause) -> Result<(), AppError> {
        self.inner
            .write()
            .await
            .insert(pause.platform_campaign_id.clone(), pause);
        Ok(())
    }

    async fn find(&self, platform_campaign_id: &str) -> Result<Option<SpendPause>, AppError> {
        Ok(self.inner.read().await.get(platform_campaign_id).cloned())
    }

    async fn delete(&self, platform_campaign_id: &str) -> Result<bool, AppError> {
        Ok(self.inner.write().await.remove(platform_campaign_id).is_some())
    }
}

#[derive(Default)]
struct BudgetLogStore {
    next_id: i64,
    rows: Vec<BudgetLogEntry>,
}

/// In-memory budget log repository.
#[derive(Default)]
pub struct MemoryBudgetLogRepository {
    inner: RwLock<BudgetLogStore>,
}

impl MemoryBudgetLogRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BudgetLogRepository for MemoryBudgetLogRepository {
    async fn append_all(&self, entries: Vec<NewBudgetLogEntry>) -> Result<(), AppError> {
        let mut store = self.inner.write().await;
        for entry in entries {
            store.next_id += 1;
            let id = store.next_id;
            store.rows.push(BudgetLogEntry {
                id,
                url_id: entry.url_id,
                campaign_id: entry.campaign_id,
                price: entry.price,
                created_at: Utc::now(),
            });
        }
        Ok(())
    }

    async fn list_by_campaign(&self, campaign_id: i64) -> Result<Vec<BudgetLogEntry>, AppError> {
        Ok(self
            .inner
            .read()
            .await
            .rows
            .iter()
            .rev()
            .filter(|e| e.campaign_id == campaign_id)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
struct ClickLogStore {
    next_id: i64,
    rows: Vec<ClickRecord>,
}

/// In-memory click audit log repository.
#[derive(Default)]
pub struct MemoryClickLogRepository {
    inner: RwLock<ClickLogStore>,
}

impl MemoryClickLogRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClickLogRepository for MemoryClickLogRepository {
    async fn insert(&self, click: NewClick) -> Result<(), AppError> {
        let mut store = self.inner.write().await;
        store.next_id += 1;
        let id = store.next_id;
        store.rows.push(ClickRecord {
            id,
            url_id: click.url_id,
            campaign_id: click.campaign_id,
            ip: click.ip,
            user_agent: click.user_agent,
            referer: click.referer,
            clicked_at: Utc::now(),
        });
        Ok(())
    }

    async fn count_by_url(&self, url_id: i64) -> Result<i64, AppError> {
        Ok(self
            .inner
            .read()
            .await
            .rows
            .iter()
            .filter(|c| c.url_id == url_id)
            .count() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::RedirectMethod;
    use rust_decimal::Decimal;

    fn new_url(campaign_id: i64, limit: i64) -> NewUrl {
        NewUrl {
            campaign_id,
            name: "landing".to_string(),
            target_url: "https://shop.example.com/a".to_string(),
            click_limit: limit,
        }
    }

    #[tokio::test]
    async fn test_register_click_counts_and_completes() {
        let repo = MemoryUrlRepository::new();
        let url = repo.create(new_url(1, 2)).await.unwrap();

        assert_eq!(
            repo.register_click(url.id).await.unwrap(),
            ClickOutcome::Registered {
                clicks: 1,
                completed: false
            }
        );
        assert_eq!(
            repo.register_click(url.id).await.unwrap(),
            ClickOutcome::Registered {
                clicks: 2,
                completed: true
            }
        );

        let stored = repo.find_by_id(url.id).await.unwrap().unwrap();
        assert_eq!(stored.status, UrlStatus::Completed);
        assert_eq!(stored.clicks, stored.click_limit);
    }

    #[tokio::test]
    async fn test_register_click_exhausted_and_not_found() {
        let repo = MemoryUrlRepository::new();
        let url = repo.create(new_url(1, 1)).await.unwrap();

        repo.register_click(url.id).await.unwrap();
        assert_eq!(
            repo.register_click(url.id).await.unwrap(),
            ClickOutcome::Exhausted
        );
        assert_eq!(
            repo.register_click(999).await.unwrap(),
            ClickOutcome::NotFound
        );
    }

    #[tokio::test]
    async fn test_register_click_respects_paused_status() {
        let repo = MemoryUrlRepository::new();
        let url = repo.create(new_url(1, 10)).await.unwrap();
        repo.set_status(url.id, UrlStatus::Paused).await.unwrap();

        assert_eq!(
            repo.register_click(url.id).await.unwrap(),
            ClickOutcome::Exhausted
        );
    }

    #[tokio::test]
    async fn test_active_remaining_sums_active_only() {
        let repo = MemoryUrlRepository::new();
        let a = repo.create(new_url(1, 100)).await.unwrap();
        let b = repo.create(new_url(1, 50)).await.unwrap();
        repo.create(new_url(2, 500)).await.unwrap();

        repo.register_click(a.id).await.unwrap();
        repo.set_status(b.id, UrlStatus::Paused).await.unwrap();

        assert_eq!(repo.active_remaining(1).await.unwrap(), 99);
    }

    #[tokio::test]
    async fn test_campaign_custom_path_conflict() {
        let repo = MemoryCampaignRepository::new();
        let new_campaign = NewCampaign {
            name: "spring".to_string(),
            redirect_method: RedirectMethod::Direct,
            custom_path: Some("spring-sale".to_string()),
            click_multiplier: Decimal::ONE,
            price_per_thousand_clicks: Decimal::ZERO,
            auto_manage: false,
            platform_campaign_id: None,
            recheck_wait_minutes: 10,
        };
        repo.create(new_campaign.clone()).await.unwrap();

        let result = repo.create(new_campaign).await;
        assert!(matches!(result.unwrap_err(), AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_campaign_patch_clears_custom_path() {
        let repo = MemoryCampaignRepository::new();
        let campaign = repo
            .create(NewCampaign {
                name: "spring".to_string(),
                redirect_method: RedirectMethod::Direct,
                custom_path: Some("spring-sale".to_string()),
                click_multiplier: Decimal::ONE,
                price_per_thousand_clicks: Decimal::ZERO,
                auto_manage: false,
                platform_campaign_id: None,
                recheck_wait_minutes: 10,
            })
            .await
            .unwrap();

        let updated = repo
            .update(
                campaign.id,
                CampaignPatch {
                    custom_path: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(updated.custom_path.is_none());
        assert!(
            repo.find_by_custom_path("spring-sale")
                .await
                .unwrap()
                .is_none()
        );
    }
}
