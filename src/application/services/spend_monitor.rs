//! Daily-spend monitor for externally linked campaigns.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tokio::sync::Mutex;

use crate::error::AppError;
use crate::infrastructure::platform::AdPlatform;

/// Reads a linked campaign's spend for the current UTC day.
///
/// Results are cached per (platform campaign id, UTC date) so one
/// scheduler pass never asks the platform twice for the same campaign.
/// [`begin_pass`](SpendMonitor::begin_pass) clears the cache at tick
/// start; an entry left over from a previous UTC day is ignored even if
/// it survives a clear.
pub struct SpendMonitor {
    platform: Arc<dyn AdPlatform>,
    cache: Mutex<HashMap<String, (NaiveDate, Decimal)>>,
}

impl SpendMonitor {
    /// Creates a monitor over the given platform client.
    pub fn new(platform: Arc<dyn AdPlatform>) -> Self {
        Self {
            platform,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Clears the per-pass cache. Called once at the start of every
    /// scheduler tick.
    pub async fn begin_pass(&self) {
        self.cache.lock().await.clear();
    }

    /// Today-so-far spend for the campaign, in UTC.
    ///
    /// A missing or empty report reads as zero: a freshly created
    /// campaign legitimately has no spend yet.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] when the platform call fails.
    pub async fn today_spend(&self, platform_campaign_id: &str) -> Result<Decimal, AppError> {
        let today = Utc::now().date_naive();

        {
            let cache = self.cache.lock().await;
            if let Some((date, spend)) = cache.get(platform_campaign_id) {
                if *date == today {
                    return Ok(*spend);
                }
            }
        }

        let spend = self
            .platform
            .spend(platform_campaign_id, today, today)
            .await?
            .unwrap_or(Decimal::ZERO);

        self.cache
            .lock()
            .await
            .insert(platform_campaign_id.to_string(), (today, spend));

        Ok(spend)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::platform::MockAdPlatform;

    #[tokio::test]
    async fn test_spend_is_cached_within_a_pass() {
        let mut platform = MockAdPlatform::new();
        platform
            .expect_spend()
            .times(1)
            .returning(|_, _, _| Ok(Some(Decimal::new(980, 2))));

        let monitor = SpendMonitor::new(Arc::new(platform));

        assert_eq!(
            monitor.today_spend("pc-77").await.unwrap(),
            Decimal::new(980, 2)
        );
        // Second read within the pass hits the cache, not the mock.
        assert_eq!(
            monitor.today_spend("pc-77").await.unwrap(),
            Decimal::new(980, 2)
        );
    }

    #[tokio::test]
    async fn test_begin_pass_clears_cache() {
        let mut platform = MockAdPlatform::new();
        platform
            .expect_spend()
            .times(2)
            .returning(|_, _, _| Ok(Some(Decimal::TEN)));

        let monitor = SpendMonitor::new(Arc::new(platform));

        monitor.today_spend("pc-77").await.unwrap();
        monitor.begin_pass().await;
        monitor.today_spend("pc-77").await.unwrap();
    }

    #[tokio::test]
    async fn test_distinct_campaigns_are_cached_separately() {
        let mut platform = MockAdPlatform::new();
        platform
            .expect_spend()
            .times(2)
            .returning(|id, _, _| match id {
                "pc-1" => Ok(Some(Decimal::ONE)),
                _ => Ok(Some(Decimal::TWO)),
            });

        let monitor = SpendMonitor::new(Arc::new(platform));

        assert_eq!(monitor.today_spend("pc-1").await.unwrap(), Decimal::ONE);
        assert_eq!(monitor.today_spend("pc-2").await.unwrap(), Decimal::TWO);
    }

    #[tokio::test]
    async fn test_missing_report_reads_as_zero() {
        let mut platform = MockAdPlatform::new();
        platform.expect_spend().times(1).returning(|_, _, _| Ok(None));

        let monitor = SpendMonitor::new(Arc::new(platform));

        assert_eq!(monitor.today_spend("pc-new").await.unwrap(), Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_platform_failure_maps_to_upstream() {
        use crate::infrastructure::platform::PlatformError;

        let mut platform = MockAdPlatform::new();
        platform.expect_spend().times(1).returning(|_, _, _| {
            Err(PlatformError::Api {
                status: 503,
                body: "maintenance".to_string(),
            })
        });

        let monitor = SpendMonitor::new(Arc::new(platform));
        let err = monitor.today_spend("pc-77").await.unwrap_err();

        assert!(matches!(err, AppError::Upstream { .. }));
    }
}
