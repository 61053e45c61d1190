//! PostgreSQL implementation of the campaign repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Campaign, CampaignPatch, NewCampaign, RedirectMethod};
use crate::domain::repositories::CampaignRepository;
use crate::error::AppError;

const CAMPAIGN_COLUMNS: &str = "id, name, redirect_method, custom_path, click_multiplier, \
     price_per_thousand_clicks, auto_manage, platform_campaign_id, recheck_wait_minutes, \
     created_at, updated_at";

#[derive(sqlx::FromRow)]
struct CampaignRow {
    id: i64,
    name: String,
    redirect_method: String,
    custom_path: Option<String>,
    click_multiplier: Decimal,
    price_per_thousand_clicks: Decimal,
    auto_manage: bool,
    platform_campaign_id: Option<String>,
    recheck_wait_minutes: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CampaignRow> for Campaign {
    fn from(row: CampaignRow) -> Self {
        Campaign {
            id: row.id,
            name: row.name,
            redirect_method: RedirectMethod::parse_or_default(&row.redirect_method),
            custom_path: row.custom_path,
            click_multiplier: row.click_multiplier,
            price_per_thousand_clicks: row.price_per_thousand_clicks,
            auto_manage: row.auto_manage,
            platform_campaign_id: row.platform_campaign_id,
            recheck_wait_minutes: row.recheck_wait_minutes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// PostgreSQL repository for campaign storage and retrieval.
///
/// Uses SQLx prepared statements for SQL injection protection.
pub struct PgCampaignRepository {
    pool: Arc<PgPool>,
}

impl PgCampaignRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CampaignRepository for PgCampaignRepository {
    async fn create(&self, new_campaign: NewCampaign) -> Result<Campaign, AppError> {
        let sql = format!(
            "INSERT INTO campaigns \
                 (name, redirect_method, custom_path, click_multiplier, \
                  price_per_thousand_clicks, auto_manage, platform_campaign_id, \
                  recheck_wait_minutes) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {CAMPAIGN_COLUMNS}"
        );
        let row = sqlx::query_as::<_, CampaignRow>(&sql)
            .bind(&new_campaign.name)
            .bind(new_campaign.redirect_method.as_str())
            .bind(&new_campaign.custom_path)
            .bind(new_campaign.click_multiplier)
            .bind(new_campaign.price_per_thousand_clicks)
            .bind(new_campaign.auto_manage)
            .bind(&new_campaign.platform_campaign_id)
            .bind(new_campaign.recheck_wait_minutes)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Campaign>, AppError> {
        let sql = format!("SELECT {CAMPAIGN_COLUMNS} FROM campaigns WHERE id = $1");
        let row = sqlx::query_as::<_, CampaignRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Campaign::from))
    }

    async fn find_by_custom_path(
        &self,
        custom_path: &str,
    ) -> Result<Option<Campaign>, AppError> {
        let sql = format!("SELECT {CAMPAIGN_COLUMNS} FROM campaigns WHERE custom_path = $1");
        let row = sqlx::query_as::<_, CampaignRow>(&sql)
            .bind(custom_path)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Campaign::from))
    }

    async fn list(&self) -> Result<Vec<Campaign>, AppError> {
        let sql = format!("SELECT {CAMPAIGN_COLUMNS} FROM campaigns ORDER BY created_at DESC");
        let rows = sqlx::query_as::<_, CampaignRow>(&sql)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Campaign::from).collect())
    }

    async fn list_auto_managed(&self) -> Result<Vec<Campaign>, AppError> {
        let sql = format!(
            "SELECT {CAMPAIGN_COLUMNS} FROM campaigns \
             WHERE auto_manage AND platform_campaign_id IS NOT NULL \
             ORDER BY id"
        );
        let rows = sqlx::query_as::<_, CampaignRow>(&sql)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Campaign::from).collect())
    }

    async fn update(&self, id: i64, patch: CampaignPatch) -> Result<Campaign, AppError> {
        let set_custom_path = patch.custom_path.is_some();
        let new_custom_path = patch.custom_path.and_then(|v| v);
        let set_platform_id = patch.platform_campaign_id.is_some();
        let new_platform_id = patch.platform_campaign_id.and_then(|v| v);

        let sql = format!(
            "UPDATE campaigns SET \
                name                      = COALESCE($2::TEXT, name), \
                redirect_method           = COALESCE($3::TEXT, redirect_method), \
                custom_path               = CASE WHEN $4 THEN $5::TEXT ELSE custom_path END, \
                click_multiplier          = COALESCE($6::NUMERIC, click_multiplier), \
                price_per_thousand_clicks = COALESCE($7::NUMERIC, price_per_thousand_clicks), \
                auto_manage               = COALESCE($8::BOOLEAN, auto_manage), \
                platform_campaign_id      = CASE WHEN $9 THEN $10::TEXT ELSE platform_campaign_id END, \
                recheck_wait_minutes      = COALESCE($11::INT, recheck_wait_minutes), \
                updated_at                = NOW() \
             WHERE id = $1 \
             RETURNING {CAMPAIGN_COLUMNS}"
        );
        let row = sqlx::query_as::<_, CampaignRow>(&sql)
            .bind(id)
            .bind(patch.name)
            .bind(patch.redirect_method.map(|m| m.as_str()))
            .bind(set_custom_path)
            .bind(new_custom_path)
            .bind(patch.click_multiplier)
            .bind(patch.price_per_thousand_clicks)
            .bind(patch.auto_manage)
            .bind(set_platform_id)
            .bind(new_platform_id)
            .bind(patch.recheck_wait_minutes)
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.map(Campaign::from)
            .ok_or_else(|| AppError::not_found("Campaign not found", json!({"id": id})))
    }
}
