//! Tracked URL entity with its click budget.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a tracked URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrlStatus {
    /// Participates in rotation and accepts clicks.
    Active,
    /// Temporarily withheld by an operator.
    Paused,
    /// Soft-deleted, kept for reporting.
    Deleted,
    /// Click limit reached; terminal.
    Completed,
}

impl UrlStatus {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "active" => Some(Self::Active),
            "paused" => Some(Self::Paused),
            "deleted" => Some(Self::Deleted),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Paused => "paused",
            Self::Deleted => "deleted",
            Self::Completed => "completed",
        }
    }
}

/// A destination URL under a campaign, carrying its own click budget.
///
/// Invariant: `clicks <= click_limit` at all times. The only code path
/// that increments `clicks` is the guarded update in the URL repository,
/// which refuses to pass the limit.
#[derive(Debug, Clone)]
pub struct TrackedUrl {
    pub id: i64,
    pub campaign_id: i64,
    pub name: String,
    pub target_url: String,
    /// Effective limit, already scaled by the campaign multiplier.
    pub click_limit: i64,
    pub clicks: i64,
    pub status: UrlStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TrackedUrl {
    /// Clicks still available before the limit.
    pub fn remaining(&self) -> i64 {
        (self.click_limit - self.clicks).max(0)
    }

    /// True when the URL can receive a click right now.
    pub fn is_active(&self) -> bool {
        self.status == UrlStatus::Active && self.remaining() > 0
    }
}

/// Input data for registering a URL under a campaign.
///
/// `click_limit` here is the requested raw limit; the service scales it by
/// the campaign multiplier before storage.
#[derive(Debug, Clone)]
pub struct NewUrl {
    pub campaign_id: i64,
    pub name: String,
    pub target_url: String,
    pub click_limit: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(clicks: i64, limit: i64, status: UrlStatus) -> TrackedUrl {
        TrackedUrl {
            id: 5,
            campaign_id: 1,
            name: "landing-a".to_string(),
            target_url: "https://shop.example.com/a".to_string(),
            click_limit: limit,
            clicks,
            status,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_remaining() {
        assert_eq!(url(300, 1000, UrlStatus::Active).remaining(), 700);
        assert_eq!(url(1000, 1000, UrlStatus::Completed).remaining(), 0);
    }

    #[test]
    fn test_remaining_never_negative() {
        // Limit lowered below the served count after the fact.
        assert_eq!(url(1200, 1000, UrlStatus::Completed).remaining(), 0);
    }

    #[test]
    fn test_is_active() {
        assert!(url(0, 100, UrlStatus::Active).is_active());
        assert!(!url(100, 100, UrlStatus::Active).is_active());
        assert!(!url(0, 100, UrlStatus::Paused).is_active());
        assert!(!url(0, 100, UrlStatus::Deleted).is_active());
        assert!(!url(0, 100, UrlStatus::Completed).is_active());
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(UrlStatus::parse("active"), Some(UrlStatus::Active));
        assert_eq!(UrlStatus::parse("completed"), Some(UrlStatus::Completed));
        assert_eq!(UrlStatus::parse("archived"), None);
    }
}
