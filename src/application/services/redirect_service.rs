//! Redirect resolution service.
//!
//! Resolves the four public request shapes to a [`RedirectCommand`] and
//! registers exactly one click per resolved request. Registration happens
//! before the command is emitted and is never rolled back; a click lost to
//! a failed delivery stays billed.

use std::sync::Arc;

use rand::Rng;
use serde_json::json;

use crate::application::services::click_service::ClickService;
use crate::domain::entities::{Campaign, RedirectMethod, TrackedUrl};
use crate::domain::repositories::{CampaignRepository, ClickOutcome, UrlRepository};
use crate::error::AppError;

/// How the HTTP layer should deliver the visitor to the destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectCommand {
    /// 302 Found with a Location header.
    Found { location: String },
    /// 307 Temporary Redirect with a Location header.
    TemporaryRedirect { location: String },
    /// 200 HTML page with a zero-delay refresh directive.
    MetaRefresh { location: String },
}

/// A resolved redirect with the click it was billed against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRedirect {
    pub url_id: i64,
    pub campaign_id: i64,
    pub command: RedirectCommand,
}

/// Relative path of the second hop of a double refresh.
pub fn bridge_path(campaign_id: i64, url_id: i64) -> String {
    format!("/r/bridge/{campaign_id}/{url_id}")
}

fn command_for(method: RedirectMethod, campaign_id: i64, url: &TrackedUrl) -> RedirectCommand {
    match method {
        RedirectMethod::Direct => RedirectCommand::Found {
            location: url.target_url.clone(),
        },
        RedirectMethod::MetaRefresh => RedirectCommand::MetaRefresh {
            location: url.target_url.clone(),
        },
        RedirectMethod::DoubleMetaRefresh => RedirectCommand::MetaRefresh {
            location: bridge_path(campaign_id, url.id),
        },
        RedirectMethod::Http307 => RedirectCommand::TemporaryRedirect {
            location: url.target_url.clone(),
        },
    }
}

/// Picks the candidate a weighted roll in `0..total_remaining` lands on.
fn weighted_index(candidates: &[TrackedUrl], mut roll: i64) -> usize {
    for (index, url) in candidates.iter().enumerate() {
        let weight = url.remaining();
        if roll < weight {
            return index;
        }
        roll -= weight;
    }
    candidates.len() - 1
}

/// Resolves redirect requests to destination URLs.
pub struct RedirectService {
    campaigns: Arc<dyn CampaignRepository>,
    urls: Arc<dyn UrlRepository>,
    clicks: Arc<ClickService>,
}

impl RedirectService {
    /// Creates a new redirect service.
    pub fn new(
        campaigns: Arc<dyn CampaignRepository>,
        urls: Arc<dyn UrlRepository>,
        clicks: Arc<ClickService>,
    ) -> Self {
        Self {
            campaigns,
            urls,
            clicks,
        }
    }

    /// Resolves `GET /r/{campaign_id}/{url_id}`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the campaign or URL is missing
    /// or the URL belongs to another campaign, [`AppError::Gone`] when the
    /// URL has no remaining clicks.
    pub async fn resolve_direct(
        &self,
        campaign_id: i64,
        url_id: i64,
    ) -> Result<ResolvedRedirect, AppError> {
        let (campaign, url) = self.load_pair(campaign_id, url_id).await?;
        self.clicks.register_click(url.id).await?;

        Ok(ResolvedRedirect {
            url_id: url.id,
            campaign_id,
            command: command_for(campaign.redirect_method, campaign_id, &url),
        })
    }

    /// Resolves `GET /r/bridge/{campaign_id}/{url_id}`, the second hop of
    /// a double refresh.
    ///
    /// The hop registers its own click and always emits a refresh straight
    /// to the target, whatever the campaign's configured method.
    pub async fn resolve_bridge(
        &self,
        campaign_id: i64,
        url_id: i64,
    ) -> Result<ResolvedRedirect, AppError> {
        let (_, url) = self.load_pair(campaign_id, url_id).await?;
        self.clicks.register_click(url.id).await?;

        Ok(ResolvedRedirect {
            url_id: url.id,
            campaign_id,
            command: RedirectCommand::MetaRefresh {
                location: url.target_url.clone(),
            },
        })
    }

    /// Resolves `GET /c/{campaign_id}` by weighted rotation over the
    /// campaign's active URLs.
    pub async fn resolve_rotation(&self, campaign_id: i64) -> Result<ResolvedRedirect, AppError> {
        let campaign = self.load_campaign(campaign_id).await?;
        self.rotate(&campaign).await
    }

    /// Resolves `GET /views/{custom_path}`: the slug names a campaign,
    /// then rotation applies. A single-URL campaign degenerates to that
    /// URL.
    pub async fn resolve_custom_path(&self, slug: &str) -> Result<ResolvedRedirect, AppError> {
        let campaign = self
            .campaigns
            .find_by_custom_path(slug)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Unknown custom path", json!({"custom_path": slug}))
            })?;

        self.rotate(&campaign).await
    }

    async fn load_campaign(&self, campaign_id: i64) -> Result<Campaign, AppError> {
        self.campaigns.find_by_id(campaign_id).await?.ok_or_else(|| {
            AppError::not_found("Campaign not found", json!({"campaign_id": campaign_id}))
        })
    }

    async fn load_pair(
        &self,
        campaign_id: i64,
        url_id: i64,
    ) -> Result<(Campaign, TrackedUrl), AppError> {
        let campaign = self.load_campaign(campaign_id).await?;
        let url = self
            .urls
            .find_by_id(url_id)
            .await?
            .filter(|u| u.campaign_id == campaign_id)
            .ok_or_else(|| {
                AppError::not_found(
                    "URL not found in campaign",
                    json!({"campaign_id": campaign_id, "url_id": url_id}),
                )
            })?;

        Ok((campaign, url))
    }

    /// Weighted draw over remaining capacity, with redraw on race loss.
    ///
    /// Losing `register_click` to a concurrent request (or to a URL
    /// deleted mid-flight) removes the candidate and draws again; only an
    /// empty candidate set gives up.
    async fn rotate(&self, campaign: &Campaign) -> Result<ResolvedRedirect, AppError> {
        let mut candidates: Vec<TrackedUrl> = self
            .urls
            .list_active_by_campaign(campaign.id)
            .await?
            .into_iter()
            .filter(|u| u.remaining() > 0)
            .collect();

        while !candidates.is_empty() {
            let index = if candidates.len() == 1 {
                0
            } else {
                let total: i64 = candidates.iter().map(|u| u.remaining()).sum();
                let roll = rand::rng().random_range(0..total);
                weighted_index(&candidates, roll)
            };

            match self.clicks.try_register(candidates[index].id).await? {
                ClickOutcome::Registered { .. } => {
                    let chosen = candidates.swap_remove(index);
                    return Ok(ResolvedRedirect {
                        url_id: chosen.id,
                        campaign_id: campaign.id,
                        command: command_for(campaign.redirect_method, campaign.id, &chosen),
                    });
                }
                ClickOutcome::Exhausted | ClickOutcome::NotFound => {
                    candidates.swap_remove(index);
                }
            }
        }

        Err(AppError::gone(
            "No active URL with remaining clicks",
            json!({"campaign_id": campaign.id}),
        ))
    }
}
