//! PostgreSQL implementation of the tracked URL repository.
//!
//! Click accounting lives here: `register_click` is a single guarded
//! UPDATE, so concurrent registrations can never push `clicks` past
//! `click_limit` no matter how they interleave.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewUrl, TrackedUrl, UrlStatus};
use crate::domain::repositories::{ClickOutcome, UrlRepository};
use crate::error::AppError;

const URL_COLUMNS: &str =
    "id, campaign_id, name, target_url, click_limit, clicks, status, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct UrlRow {
    id: i64,
    campaign_id: i64,
    name: String,
    target_url: String,
    click_limit: i64,
    clicks: i64,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UrlRow> for TrackedUrl {
    type Error = AppError;

    fn try_from(row: UrlRow) -> Result<Self, Self::Error> {
        let status = UrlStatus::parse(&row.status).ok_or_else(|| {
            AppError::internal(
                "Unknown URL status in storage",
                json!({"id": row.id, "status": row.status}),
            )
        })?;
        Ok(TrackedUrl {
            id: row.id,
            campaign_id: row.campaign_id,
            name: row.name,
            target_url: row.target_url,
            click_limit: row.click_limit,
            clicks: row.clicks,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// PostgreSQL repository for tracked URLs.
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn create(&self, new_url: NewUrl) -> Result<TrackedUrl, AppError> {
        let sql = format!(
            "INSERT INTO campaign_urls (campaign_id, name, target_url, click_limit) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {URL_COLUMNS}"
        );
        let row = sqlx::query_as::<_, UrlRow>(&sql)
            .bind(new_url.campaign_id)
            .bind(&new_url.name)
            .bind(&new_url.target_url)
            .bind(new_url.click_limit)
            .fetch_one(self.pool.as_ref())
            .await?;

        row.try_into()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<TrackedUrl>, AppError> {
        let sql = format!("SELECT {URL_COLUMNS} FROM campaign_urls WHERE id = $1");
        let row = sqlx::query_as::<_, UrlRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.map(TrackedUrl::try_from).transpose()
    }

    async fn list_by_campaign(&self, campaign_id: i64) -> Result<Vec<TrackedUrl>, AppError> {
        let sql = format!(
            "SELECT {URL_COLUMNS} FROM campaign_urls WHERE campaign_id = $1 ORDER BY id"
        );
        let rows = sqlx::query_as::<_, UrlRow>(&sql)
            .bind(campaign_id)
            .fetch_all(self.pool.as_ref())
            .await?;

        rows.into_iter().map(TrackedUrl::try_from).collect()
    }

    async fn list_active_by_campaign(
        &self,
        campaign_id: i64,
    ) -> Result<Vec<TrackedUrl>, AppError> {
        let sql = format!(
            "SELECT {URL_COLUMNS} FROM campaign_urls \
             WHERE campaign_id = $1 AND status = 'active' \
             ORDER BY id"
        );
        let rows = sqlx::query_as::<_, UrlRow>(&sql)
            .bind(campaign_id)
            .fetch_all(self.pool.as_ref())
            .await?;

        rows.into_iter().map(TrackedUrl::try_from).collect()
    }

    async fn register_click(&self, id: i64) -> Result<ClickOutcome, AppError> {
        // The WHERE clause is the whole mechanism: only an active row
        // below its limit matches, and the completion flip happens in the
        // same statement that increments.
        let row = sqlx::query_as::<_, (i64, String)>(
            "UPDATE campaign_urls SET \
                clicks = clicks + 1, \
                status = CASE WHEN clicks + 1 >= click_limit THEN 'completed' ELSE status END, \
                updated_at = NOW() \
             WHERE id = $1 AND status = 'active' AND clicks < click_limit \
             RETURNING clicks, status",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        if let Some((clicks, status)) = row {
            return Ok(ClickOutcome::Registered {
                clicks,
                completed: status == UrlStatus::Completed.as_str(),
            });
        }

        // Zero rows updated: the URL is either missing or not clickable.
        let exists = sqlx::query_scalar::<_, i64>("SELECT id FROM campaign_urls WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(match exists {
            Some(_) => ClickOutcome::Exhausted,
            None => ClickOutcome::NotFound,
        })
    }

    async fn active_remaining(&self, campaign_id: i64) -> Result<i64, AppError> {
        let remaining = sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(SUM(click_limit - clicks), 0)::BIGINT \
             FROM campaign_urls \
             WHERE campaign_id = $1 AND status = 'active'",
        )
        .bind(campaign_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(remaining)
    }

    async fn update(
        &self,
        id: i64,
        name: Option<String>,
        target_url: Option<String>,
    ) -> Result<TrackedUrl, AppError> {
        let sql = format!(
            "UPDATE campaign_urls SET \
                name       = COALESCE($2::TEXT, name), \
                target_url = COALESCE($3::TEXT, target_url), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {URL_COLUMNS}"
        );
        let row = sqlx::query_as::<_, UrlRow>(&sql)
            .bind(id)
            .bind(name)
            .bind(target_url)
            .fetch_optional(self.pool.as_ref())
            .await?;

        match row {
            Some(row) => row.try_into(),
            None => Err(AppError::not_found("URL not found", json!({"id": id}))),
        }
    }

    async fn set_status(&self, id: i64, status: UrlStatus) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE campaign_urls SET status = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(status.as_str())
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
