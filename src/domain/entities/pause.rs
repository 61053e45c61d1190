//! Spend-pause record for an externally linked campaign.

use chrono::{DateTime, NaiveDate, Utc};

/// Records that a platform campaign was paused for exceeding the daily
/// spend threshold, and when it becomes eligible for a recheck.
///
/// Keyed by the platform campaign id: at most one live record per linked
/// campaign. A record whose `pause_date` is not the current UTC date is
/// stale and must be discarded, never acted on.
#[derive(Debug, Clone, PartialEq)]
pub struct SpendPause {
    pub platform_campaign_id: String,
    /// UTC date the spend was measured on.
    pub pause_date: NaiveDate,
    pub paused_at: DateTime<Utc>,
    pub recheck_at: DateTime<Utc>,
}

impl SpendPause {
    /// True when the record refers to a previous UTC day.
    pub fn is_stale(&self, today: NaiveDate) -> bool {
        self.pause_date != today
    }

    /// True when the recheck wait has elapsed.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        now >= self.recheck_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn pause() -> SpendPause {
        let paused_at = Utc.with_ymd_and_hms(2025, 3, 10, 14, 0, 0).unwrap();
        SpendPause {
            platform_campaign_id: "pc-77".to_string(),
            pause_date: paused_at.date_naive(),
            paused_at,
            recheck_at: paused_at + chrono::Duration::minutes(10),
        }
    }

    #[test]
    fn test_stale_on_next_day() {
        let record = pause();
        assert!(!record.is_stale(record.pause_date));
        assert!(record.is_stale(record.pause_date + chrono::Duration::days(1)));
    }

    #[test]
    fn test_due_after_wait() {
        let record = pause();
        assert!(!record.is_due(record.paused_at + chrono::Duration::minutes(5)));
        assert!(record.is_due(record.recheck_at));
        assert!(record.is_due(record.recheck_at + chrono::Duration::minutes(1)));
    }
}
