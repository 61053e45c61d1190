//! PostgreSQL implementation of the budget log repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{BudgetLogEntry, NewBudgetLogEntry};
use crate::domain::repositories::BudgetLogRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct BudgetLogRow {
    id: i64,
    url_id: i64,
    campaign_id: i64,
    price: Decimal,
    created_at: DateTime<Utc>,
}

impl From<BudgetLogRow> for BudgetLogEntry {
    fn from(row: BudgetLogRow) -> Self {
        BudgetLogEntry {
            id: row.id,
            url_id: row.url_id,
            campaign_id: row.campaign_id,
            price: row.price,
            created_at: row.created_at,
        }
    }
}

/// PostgreSQL repository for the append-only budget log.
pub struct PgBudgetLogRepository {
    pool: Arc<PgPool>,
}

impl PgBudgetLogRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BudgetLogRepository for PgBudgetLogRepository {
    async fn append_all(&self, entries: Vec<NewBudgetLogEntry>) -> Result<(), AppError> {
        if entries.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await?;
        for entry in entries {
            sqlx::query(
                "INSERT INTO url_budget_log (url_id, campaign_id, price) VALUES ($1, $2, $3)",
            )
            .bind(entry.url_id)
            .bind(entry.campaign_id)
            .bind(entry.price)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        Ok(())
    }

    async fn list_by_campaign(&self, campaign_id: i64) -> Result<Vec<BudgetLogEntry>, AppError> {
        let rows = sqlx::query_as::<_, BudgetLogRow>(
            "SELECT id, url_id, campaign_id, price, created_at \
             FROM url_budget_log \
             WHERE campaign_id = $1 \
             ORDER BY created_at DESC, id DESC",
        )
        .bind(campaign_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(BudgetLogEntry::from).collect())
    }
}
