//! Budget recalculation at spend-pause recheck time.

use std::sync::Arc;

use chrono::{DateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde_json::json;
use tracing::info;

use crate::domain::entities::{Campaign, NewBudgetLogEntry};
use crate::domain::repositories::{BudgetLogRepository, PauseRepository, UrlRepository};
use crate::error::AppError;
use crate::infrastructure::platform::AdPlatform;

use super::spend_monitor::SpendMonitor;

/// End of the current UTC day, the schedule boundary for a recalculated
/// budget.
fn end_of_day_utc(now: DateTime<Utc>) -> DateTime<Utc> {
    let last_second = NaiveTime::from_hms_opt(23, 59, 59).expect("valid time of day");
    now.date_naive().and_time(last_second).and_utc()
}

/// Recomputes and applies a campaign's daily budget at recheck time.
///
/// The new budget is a pure function of current spend and current
/// remaining capacity, so a retried recheck recomputes instead of
/// double-applying: idempotent by construction, not by deduplication.
pub struct BudgetService {
    urls: Arc<dyn UrlRepository>,
    budget_log: Arc<dyn BudgetLogRepository>,
    pauses: Arc<dyn PauseRepository>,
    spend: Arc<SpendMonitor>,
    platform: Arc<dyn AdPlatform>,
}

impl BudgetService {
    /// Creates a new budget service.
    pub fn new(
        urls: Arc<dyn UrlRepository>,
        budget_log: Arc<dyn BudgetLogRepository>,
        pauses: Arc<dyn PauseRepository>,
        spend: Arc<SpendMonitor>,
        platform: Arc<dyn AdPlatform>,
    ) -> Self {
        Self {
            urls,
            budget_log,
            pauses,
            spend,
            platform,
        }
    }

    /// Recalculates the campaign's daily budget and reactivates it.
    ///
    /// Steps: read current spend, price the remaining capacity of every
    /// active URL (one budget-log row each), push the new budget and the
    /// end-of-day schedule to the platform, reactivate, and only then
    /// delete the spend-pause record. A failure anywhere leaves the
    /// record in place, so the next tick retries the whole recalculation.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when the campaign has no platform
    /// link, [`AppError::Upstream`] on platform failures.
    pub async fn recalculate(&self, campaign: &Campaign) -> Result<Decimal, AppError> {
        let platform_campaign_id = campaign.platform_campaign_id.as_deref().ok_or_else(|| {
            AppError::internal(
                "Budget recalculation for unlinked campaign",
                json!({"campaign_id": campaign.id}),
            )
        })?;

        let current_spend = self.spend.today_spend(platform_campaign_id).await?;

        let price_per_click = campaign.price_per_click();
        let mut pending = Decimal::ZERO;
        let mut entries = Vec::new();

        for url in self.urls.list_active_by_campaign(campaign.id).await? {
            let remaining = url.remaining();
            if remaining == 0 {
                continue;
            }
            let price = Decimal::from(remaining) * price_per_click;
            pending += price;
            entries.push(NewBudgetLogEntry {
                url_id: url.id,
                campaign_id: campaign.id,
                price,
            });
        }

        self.budget_log.append_all(entries).await?;

        let new_budget = current_spend + pending;
        let now = Utc::now();

        self.platform
            .set_budget(platform_campaign_id, new_budget, end_of_day_utc(now))
            .await?;
        self.platform.activate_campaign(platform_campaign_id).await?;

        // Both remote calls succeeded; the pause is over.
        self.pauses.delete(platform_campaign_id).await?;

        info!(
            campaign_id = campaign.id,
            platform_campaign_id,
            %current_spend,
            %pending,
            %new_budget,
            "campaign budget recalculated and reactivated"
        );

        Ok(new_budget)
    }
}
