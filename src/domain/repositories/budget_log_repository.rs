//! Repository trait for the URL budget log.

use crate::domain::entities::{BudgetLogEntry, NewBudgetLogEntry};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the append-only budget log.
///
/// Each budget recalculation appends one row per contributing URL.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgBudgetLogRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryBudgetLogRepository`] - in-memory, for tests
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BudgetLogRepository: Send + Sync {
    /// Appends one row per entry.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn append_all(&self, entries: Vec<NewBudgetLogEntry>) -> Result<(), AppError>;

    /// Lists a campaign's log rows, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_by_campaign(&self, campaign_id: i64) -> Result<Vec<BudgetLogEntry>, AppError>;
}
