//! Repository trait for the click audit log.

use crate::domain::entities::NewClick;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the append-only click audit log.
///
/// Written by the background audit worker only. Nothing on the redirect
/// path waits for it, and counter state never depends on it.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgClickLogRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryClickLogRepository`] - in-memory, for tests
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClickLogRepository: Send + Sync {
    /// Appends one audit row.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn insert(&self, click: NewClick) -> Result<(), AppError>;

    /// Counts audit rows for a URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count_by_url(&self, url_id: i64) -> Result<i64, AppError>;
}
