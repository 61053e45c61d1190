//! Ad-delivery platform client.
//!
//! The scheduler drives remote campaign state through the [`AdPlatform`]
//! trait; [`HttpAdPlatform`] is the production JSON client. Duplicate
//! pause/activate calls are assumed harmless, the platform treats them
//! idempotently.

pub mod http;

pub use http::HttpAdPlatform;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

/// Errors from the ad-delivery platform client.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("Request to ad platform failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Ad platform returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Unexpected response from ad platform: {0}")]
    Decode(String),
}

/// Remote operations on an externally managed ad campaign.
///
/// All methods take the platform-side campaign id, not the local one.
///
/// # Implementations
///
/// - [`HttpAdPlatform`] - production reqwest client
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdPlatform: Send + Sync {
    /// Stops ad delivery for the campaign.
    async fn pause_campaign(&self, platform_campaign_id: &str) -> Result<(), PlatformError>;

    /// Resumes ad delivery for the campaign.
    async fn activate_campaign(&self, platform_campaign_id: &str) -> Result<(), PlatformError>;

    /// Sets the campaign's daily budget, valid until `active_until`.
    async fn set_budget(
        &self,
        platform_campaign_id: &str,
        daily_amount: Decimal,
        active_until: DateTime<Utc>,
    ) -> Result<(), PlatformError>;

    /// Total spend over the inclusive date range.
    ///
    /// Returns `Ok(None)` when the platform has no report for the range;
    /// the caller decides what an absent report means.
    async fn spend(
        &self,
        platform_campaign_id: &str,
        date_from: NaiveDate,
        date_to: NaiveDate,
    ) -> Result<Option<Decimal>, PlatformError>;
}
