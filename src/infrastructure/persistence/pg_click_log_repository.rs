//! PostgreSQL implementation of the click audit log repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::NewClick;
use crate::domain::repositories::ClickLogRepository;
use crate::error::AppError;

/// PostgreSQL repository for the append-only click audit log.
pub struct PgClickLogRepository {
    pool: Arc<PgPool>,
}

impl PgClickLogRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClickLogRepository for PgClickLogRepository {
    async fn insert(&self, click: NewClick) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO click_log (url_id, campaign_id, ip, user_agent, referer) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(click.url_id)
        .bind(click.campaign_id)
        .bind(&click.ip)
        .bind(&click.user_agent)
        .bind(&click.referer)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn count_by_url(&self, url_id: i64) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM click_log WHERE url_id = $1",
        )
        .bind(url_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count)
    }
}
