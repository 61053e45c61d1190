//! Periodic auto-management of externally linked campaigns.
//!
//! One background task evaluates every auto-managed campaign on a fixed
//! tick: daily spend over the threshold pauses the campaign for a
//! recheck wait; low remaining click capacity pauses it; ample capacity
//! reactivates it, with a hysteresis band between the two click
//! thresholds. A due recheck hands off to the budget service.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use rust_decimal::Decimal;
use tokio::sync::Mutex;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::application::services::budget_service::BudgetService;
use crate::application::services::spend_monitor::SpendMonitor;
use crate::domain::entities::{Campaign, SpendPause};
use crate::domain::repositories::{CampaignRepository, PauseRepository, UrlRepository};
use crate::error::AppError;
use crate::infrastructure::platform::AdPlatform;

/// Scheduler thresholds, global by design.
///
/// The spend threshold and the click thresholds are deployment-level
/// constants, not campaign fields; only the recheck wait is per-campaign.
#[derive(Debug, Clone)]
pub struct SchedulerPolicy {
    /// Daily spend above this pauses the campaign for a recheck.
    pub spend_threshold: Decimal,
    /// Remaining capacity at or below this pauses the campaign.
    pub pause_click_threshold: i64,
    /// Remaining capacity at or above this reactivates it.
    pub activate_click_threshold: i64,
}

impl Default for SchedulerPolicy {
    fn default() -> Self {
        Self {
            spend_threshold: Decimal::TEN,
            pause_click_threshold: 5_000,
            activate_click_threshold: 15_000,
        }
    }
}

/// Last state this process drove a platform campaign to.
///
/// Advisory only: it suppresses redundant pause/activate calls within one
/// process lifetime and is lost on restart. One redundant idempotent call
/// after a restart is expected and harmless. The persistent spend-pause
/// record never goes through this map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DrivenState {
    Paused,
    Active,
}

/// The auto-management scheduler.
pub struct AutoManager {
    campaigns: Arc<dyn CampaignRepository>,
    urls: Arc<dyn UrlRepository>,
    pauses: Arc<dyn PauseRepository>,
    spend: Arc<SpendMonitor>,
    budget: Arc<BudgetService>,
    platform: Arc<dyn AdPlatform>,
    policy: SchedulerPolicy,
    driven: Mutex<HashMap<String, DrivenState>>,
}

impl AutoManager {
    /// Creates a scheduler over the given collaborators.
    pub fn new(
        campaigns: Arc<dyn CampaignRepository>,
        urls: Arc<dyn UrlRepository>,
        pauses: Arc<dyn PauseRepository>,
        spend: Arc<SpendMonitor>,
        budget: Arc<BudgetService>,
        platform: Arc<dyn AdPlatform>,
        policy: SchedulerPolicy,
    ) -> Self {
        Self {
            campaigns,
            urls,
            pauses,
            spend,
            budget,
            platform,
            policy,
            driven: Mutex::new(HashMap::new()),
        }
    }

    /// Runs the scheduler loop forever.
    ///
    /// A tick that is still evaluating when the next one is due makes the
    /// interval skip, never overlap; campaigns within one pass are
    /// evaluated sequentially for the same reason.
    pub async fn run(self: Arc<Self>, tick: Duration) {
        let mut interval = tokio::time::interval(tick);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(tick_secs = tick.as_secs(), "auto-management scheduler started");

        loop {
            interval.tick().await;
            self.run_once().await;
        }
    }

    /// One full evaluation pass over all auto-managed campaigns.
    ///
    /// A failing campaign is logged and skipped until the next tick; it
    /// never stalls the rest of the pass.
    pub async fn run_once(&self) {
        self.spend.begin_pass().await;

        let campaigns = match self.campaigns.list_auto_managed().await {
            Ok(campaigns) => campaigns,
            Err(e) => {
                warn!(error = %e, "failed to list auto-managed campaigns, skipping tick");
                return;
            }
        };

        for campaign in campaigns {
            if let Err(e) = self.evaluate(&campaign).await {
                warn!(
                    campaign_id = campaign.id,
                    error = %e,
                    "campaign evaluation failed, retrying next tick"
                );
            }
        }
    }

    /// Evaluates one campaign against the decision ladder.
    async fn evaluate(&self, campaign: &Campaign) -> Result<(), AppError> {
        let Some(platform_campaign_id) = campaign.platform_campaign_id.as_deref() else {
            return Ok(());
        };

        let now = Utc::now();
        let today = now.date_naive();

        if let Some(record) = self.pauses.find(platform_campaign_id).await? {
            if record.is_stale(today) {
                // Spend resets daily on the platform; a record from a
                // previous UTC day is void whatever its recheck time.
                self.pauses.delete(platform_campaign_id).await?;
                info!(
                    campaign_id = campaign.id,
                    platform_campaign_id, "discarded stale spend pause after date rollover"
                );
            } else if record.is_due(now) {
                self.budget.recalculate(campaign).await?;
                self.note_driven(platform_campaign_id, DrivenState::Active)
                    .await;
                return Ok(());
            } else {
                // Paused for spend, recheck not yet due; click logic is
                // suppressed while the record is live.
                debug!(
                    campaign_id = campaign.id,
                    recheck_at = %record.recheck_at,
                    "spend pause in effect"
                );
                return Ok(());
            }
        }

        let spend = self.spend.today_spend(platform_campaign_id).await?;
        if spend > self.policy.spend_threshold {
            // Remote pause first; the record is written only once the
            // platform confirmed, so a failed call leaves no local trace.
            self.platform.pause_campaign(platform_campaign_id).await?;
            self.note_driven(platform_campaign_id, DrivenState::Paused)
                .await;

            self.pauses
                .upsert(SpendPause {
                    platform_campaign_id: platform_campaign_id.to_string(),
                    pause_date: today,
                    paused_at: now,
                    recheck_at: now + campaign.recheck_wait(),
                })
                .await?;

            info!(
                campaign_id = campaign.id,
                platform_campaign_id,
                %spend,
                wait_minutes = campaign.recheck_wait_minutes,
                "campaign paused for daily spend"
            );
            return Ok(());
        }

        let remaining = self.urls.active_remaining(campaign.id).await?;

        if remaining <= self.policy.pause_click_threshold {
            if self.last_driven(platform_campaign_id).await != Some(DrivenState::Paused) {
                self.platform.pause_campaign(platform_campaign_id).await?;
                self.note_driven(platform_campaign_id, DrivenState::Paused)
                    .await;
                info!(
                    campaign_id = campaign.id,
                    platform_campaign_id, remaining, "campaign paused, click budget low"
                );
            }
        } else if remaining >= self.policy.activate_click_threshold {
            if self.last_driven(platform_campaign_id).await != Some(DrivenState::Active) {
                self.platform
                    .activate_campaign(platform_campaign_id)
                    .await?;
                self.note_driven(platform_campaign_id, DrivenState::Active)
                    .await;
                info!(
                    campaign_id = campaign.id,
                    platform_campaign_id, remaining, "campaign activated, click budget ample"
                );
            }
        }
        // Strictly between the thresholds: hold whatever state the
        // campaign is in.

        Ok(())
    }

    async fn last_driven(&self, platform_campaign_id: &str) -> Option<DrivenState> {
        self.driven.lock().await.get(platform_campaign_id).copied()
    }

    async fn note_driven(&self, platform_campaign_id: &str, state: DrivenState) {
        self.driven
            .lock()
            .await
            .insert(platform_campaign_id.to_string(), state);
    }
}
