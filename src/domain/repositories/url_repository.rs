//! Repository trait for tracked URL data access and click accounting.

use crate::domain::entities::{NewUrl, TrackedUrl, UrlStatus};
use crate::error::AppError;
use async_trait::async_trait;

/// Result of an atomic click registration attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The click was counted. `clicks` is the post-increment total;
    /// `completed` is true when this click reached the limit and flipped
    /// the URL to completed.
    Registered { clicks: i64, completed: bool },
    /// The URL exists but is not active or has no remaining capacity.
    Exhausted,
    /// No such URL.
    NotFound,
}

/// Repository interface for tracked URLs.
///
/// The click counter on a URL row is only ever advanced through
/// [`register_click`](UrlRepository::register_click); implementations must
/// make that operation a single atomic conditional increment so the count
/// can never pass the limit, no matter how many registrations race.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryUrlRepository`] - in-memory, for tests
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Creates a new tracked URL. `new_url.click_limit` is stored as
    /// given; multiplier scaling happens in the service layer.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_url: NewUrl) -> Result<TrackedUrl, AppError>;

    /// Finds a URL by id, regardless of status.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<TrackedUrl>, AppError>;

    /// Lists all URLs of a campaign (any status), oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_by_campaign(&self, campaign_id: i64) -> Result<Vec<TrackedUrl>, AppError>;

    /// Lists the active URLs of a campaign, oldest first. Candidates for
    /// rotation and inputs to budget recalculation.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_active_by_campaign(
        &self,
        campaign_id: i64,
    ) -> Result<Vec<TrackedUrl>, AppError>;

    /// Atomically registers one click against the URL.
    ///
    /// Counts the click only when the URL is active and below its limit,
    /// flipping status to completed in the same operation when the new
    /// count reaches the limit. Never blocks other registrations beyond
    /// the row-level update itself.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors. Exhaustion and
    /// absence are outcomes, not errors.
    async fn register_click(&self, id: i64) -> Result<ClickOutcome, AppError>;

    /// Sum of remaining capacity (`click_limit - clicks`) over the
    /// campaign's active URLs.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn active_remaining(&self, campaign_id: i64) -> Result<i64, AppError>;

    /// Updates name and/or target URL. `None` fields are unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no URL matches `id`.
    /// Returns [`AppError::Internal`] on database errors.
    async fn update(
        &self,
        id: i64,
        name: Option<String>,
        target_url: Option<String>,
    ) -> Result<TrackedUrl, AppError>;

    /// Sets the URL status.
    ///
    /// Returns `Ok(true)` if the URL was found and updated, `Ok(false)`
    /// if not found. Setting a completed URL back to active is allowed
    /// only together with a raised limit, which the service layer
    /// enforces; the repository applies what it is told.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn set_status(&self, id: i64, status: UrlStatus) -> Result<bool, AppError>;
}
