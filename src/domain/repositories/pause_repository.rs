//! Repository trait for spend-pause records.

use crate::domain::entities::SpendPause;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for daily-spend pause records.
///
/// At most one record exists per platform campaign id. The record is the
/// authoritative carrier of "paused for spend today": it is written only
/// after a successful remote pause and deleted only after a successful
/// recheck or on UTC date rollover.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgPauseRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryPauseRepository`] - in-memory, for tests
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PauseRepository: Send + Sync {
    /// Creates the record for a platform campaign, replacing any existing
    /// one (a stale record from a previous day is overwritten, not kept).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn upsert(&self, pause: SpendPause) -> Result<(), AppError>;

    /// Finds the record for a platform campaign.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find(&self, platform_campaign_id: &str) -> Result<Option<SpendPause>, AppError>;

    /// Deletes the record for a platform campaign.
    ///
    /// Returns `Ok(true)` if a record existed, `Ok(false)` otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, platform_campaign_id: &str) -> Result<bool, AppError>;
}
