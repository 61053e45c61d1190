//! Campaign entity owning tracked URLs and the redirect method policy.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How a resolved click is forwarded to the advertiser's target URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedirectMethod {
    /// Plain 302 redirect.
    Direct,
    /// 200 response carrying a zero-delay refresh directive.
    MetaRefresh,
    /// Two chained refresh hops through the bridge path.
    DoubleMetaRefresh,
    /// 307 Temporary Redirect, for platforms that require that exact code.
    Http307,
}

impl RedirectMethod {
    /// Parses a stored method name.
    ///
    /// Unknown values fall back to `Direct`. The fallback is policy: a
    /// campaign whose stored method predates the current set keeps
    /// serving clicks instead of erroring.
    pub fn parse_or_default(raw: &str) -> Self {
        match raw {
            "direct" => Self::Direct,
            "meta_refresh" => Self::MetaRefresh,
            "double_meta_refresh" => Self::DoubleMetaRefresh,
            "http_307" => Self::Http307,
            _ => Self::Direct,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::MetaRefresh => "meta_refresh",
            Self::DoubleMetaRefresh => "double_meta_refresh",
            Self::Http307 => "http_307",
        }
    }
}

/// A marketing campaign.
///
/// Owns zero or more [`super::TrackedUrl`]s. When `auto_manage` is set and
/// the campaign is linked to an ad-delivery platform campaign, the
/// scheduler drives its remote pause/activate state.
#[derive(Debug, Clone)]
pub struct Campaign {
    pub id: i64,
    pub name: String,
    pub redirect_method: RedirectMethod,
    pub custom_path: Option<String>,
    /// Scales the click limit of every URL created under this campaign.
    pub click_multiplier: Decimal,
    pub price_per_thousand_clicks: Decimal,
    pub auto_manage: bool,
    pub platform_campaign_id: Option<String>,
    /// Minutes to wait before rechecking a spend-paused campaign (1-60).
    pub recheck_wait_minutes: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Campaign {
    /// True when the scheduler should evaluate this campaign.
    pub fn is_auto_managed(&self) -> bool {
        self.auto_manage && self.platform_campaign_id.is_some()
    }

    /// Price of a single click derived from the per-thousand price.
    pub fn price_per_click(&self) -> Decimal {
        self.price_per_thousand_clicks / Decimal::ONE_THOUSAND
    }

    /// Wait between a spend pause and its recheck.
    pub fn recheck_wait(&self) -> Duration {
        Duration::minutes(i64::from(self.recheck_wait_minutes))
    }
}

/// Input data for creating a campaign.
#[derive(Debug, Clone)]
pub struct NewCampaign {
    pub name: String,
    pub redirect_method: RedirectMethod,
    pub custom_path: Option<String>,
    pub click_multiplier: Decimal,
    pub price_per_thousand_clicks: Decimal,
    pub auto_manage: bool,
    pub platform_campaign_id: Option<String>,
    pub recheck_wait_minutes: i32,
}

/// Partial update for an existing campaign.
///
/// `None` fields are left unchanged. `custom_path: Some(None)` clears the
/// slug; `Some(Some(s))` sets it. Same convention for the platform link.
#[derive(Debug, Clone, Default)]
pub struct CampaignPatch {
    pub name: Option<String>,
    pub redirect_method: Option<RedirectMethod>,
    pub custom_path: Option<Option<String>>,
    pub click_multiplier: Option<Decimal>,
    pub price_per_thousand_clicks: Option<Decimal>,
    pub auto_manage: Option<bool>,
    pub platform_campaign_id: Option<Option<String>>,
    pub recheck_wait_minutes: Option<i32>,
}
