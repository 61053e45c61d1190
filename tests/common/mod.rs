#![allow(dead_code)]

use std::sync::Arc;
use tokio::sync::mpsc;

use click_router::application::services::{CampaignService, ClickService, RedirectService};
use click_router::domain::click_event::ClickEvent;
use click_router::domain::entities::{
    Campaign, NewCampaign, NewUrl, RedirectMethod, TrackedUrl,
};
use click_router::domain::repositories::{CampaignRepository, UrlRepository};
use click_router::infrastructure::persistence::{MemoryCampaignRepository, MemoryUrlRepository};
use click_router::state::AppState;
use rust_decimal::Decimal;

/// Handles for seeding and inspecting a DB-less application state.
pub struct TestApp {
    pub state: AppState,
    pub campaigns: Arc<MemoryCampaignRepository>,
    pub urls: Arc<MemoryUrlRepository>,
    pub click_events: mpsc::Receiver<ClickEvent>,
}

/// Builds an [`AppState`] over in-memory repositories.
pub fn create_test_app() -> TestApp {
    let campaigns = Arc::new(MemoryCampaignRepository::new());
    let urls = Arc::new(MemoryUrlRepository::new());
    let (tx, rx) = mpsc::channel(100);

    let click_service = Arc::new(ClickService::new(urls.clone()));
    let redirect_service = Arc::new(RedirectService::new(
        campaigns.clone(),
        urls.clone(),
        click_service.clone(),
    ));
    let campaign_service = Arc::new(CampaignService::new(campaigns.clone(), urls.clone()));

    let state = AppState {
        redirect_service,
        click_service,
        campaign_service,
        click_sender: tx,
    };

    TestApp {
        state,
        campaigns,
        urls,
        click_events: rx,
    }
}

pub async fn create_test_campaign(
    campaigns: &MemoryCampaignRepository,
    name: &str,
    method: RedirectMethod,
) -> Campaign {
    campaigns
        .create(NewCampaign {
            name: name.to_string(),
            redirect_method: method,
            custom_path: None,
            click_multiplier: Decimal::ONE,
            price_per_thousand_clicks: Decimal::ZERO,
            auto_manage: false,
            platform_campaign_id: None,
            recheck_wait_minutes: 10,
        })
        .await
        .unwrap()
}

pub async fn create_campaign_with_path(
    campaigns: &MemoryCampaignRepository,
    name: &str,
    method: RedirectMethod,
    custom_path: &str,
) -> Campaign {
    campaigns
        .create(NewCampaign {
            name: name.to_string(),
            redirect_method: method,
            custom_path: Some(custom_path.to_string()),
            click_multiplier: Decimal::ONE,
            price_per_thousand_clicks: Decimal::ZERO,
            auto_manage: false,
            platform_campaign_id: None,
            recheck_wait_minutes: 10,
        })
        .await
        .unwrap()
}

pub async fn create_test_url(
    urls: &MemoryUrlRepository,
    campaign_id: i64,
    target: &str,
    click_limit: i64,
) -> TrackedUrl {
    urls.create(NewUrl {
        campaign_id,
        name: "landing".to_string(),
        target_url: target.to_string(),
        click_limit,
    })
    .await
    .unwrap()
}
