//! PostgreSQL implementation of the spend-pause repository.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::SpendPause;
use crate::domain::repositories::PauseRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct PauseRow {
    platform_campaign_id: String,
    pause_date: NaiveDate,
    paused_at: DateTime<Utc>,
    recheck_at: DateTime<Utc>,
}

impl From<PauseRow> for SpendPause {
    fn from(row: PauseRow) -> Self {
        SpendPause {
            platform_campaign_id: row.platform_campaign_id,
            pause_date: row.pause_date,
            paused_at: row.paused_at,
            recheck_at: row.recheck_at,
        }
    }
}

/// PostgreSQL repository for daily-spend pause records.
pub struct PgPauseRepository {
    pool: Arc<PgPool>,
}

impl PgPauseRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PauseRepository for PgPauseRepository {
    async fn upsert(&self, pause: SpendPause) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO spend_pauses (platform_campaign_id, pause_date, paused_at, recheck_at) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (platform_campaign_id) DO UPDATE SET \
                pause_date = EXCLUDED.pause_date, \
                paused_at  = EXCLUDED.paused_at, \
                recheck_at = EXCLUDED.recheck_at",
        )
        .bind(&pause.platform_campaign_id)
        .bind(pause.pause_date)
        .bind(pause.paused_at)
        .bind(pause.recheck_at)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn find(&self, platform_campaign_id: &str) -> Result<Option<SpendPause>, AppError> {
        let row = sqlx::query_as::<_, PauseRow>(
            "SELECT platform_campaign_id, pause_date, paused_at, recheck_at \
             FROM spend_pauses \
             WHERE platform_campaign_id = $1",
        )
        .bind(platform_campaign_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(SpendPause::from))
    }

    async fn delete(&self, platform_campaign_id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM spend_pauses WHERE platform_campaign_id = $1")
            .bind(platform_campaign_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
