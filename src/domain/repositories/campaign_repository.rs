//! Repository trait for campaign data access.

use crate::domain::entities::{Campaign, CampaignPatch, NewCampaign};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing campaigns.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgCampaignRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryCampaignRepository`] - in-memory, for tests
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CampaignRepository: Send + Sync {
    /// Creates a new campaign.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the custom path is already taken.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_campaign: NewCampaign) -> Result<Campaign, AppError>;

    /// Finds a campaign by id.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Campaign))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<Campaign>, AppError>;

    /// Finds a campaign by its custom path slug.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_custom_path(&self, custom_path: &str)
        -> Result<Option<Campaign>, AppError>;

    /// Lists all campaigns, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self) -> Result<Vec<Campaign>, AppError>;

    /// Lists campaigns the scheduler should evaluate: `auto_manage` set
    /// and a platform campaign id present.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_auto_managed(&self) -> Result<Vec<Campaign>, AppError>;

    /// Partially updates a campaign.
    ///
    /// Only fields present in [`CampaignPatch`] are modified. `None` fields
    /// are unchanged; `Some(None)` clears a nullable field.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no campaign matches `id`.
    /// Returns [`AppError::Conflict`] if the new custom path is taken.
    /// Returns [`AppError::Internal`] on database errors.
    async fn update(&self, id: i64, patch: CampaignPatch) -> Result<Campaign, AppError>;
}
