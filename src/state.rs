//! Shared application state injected into HTTP handlers.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::services::{CampaignService, ClickService, RedirectService};
use crate::domain::click_event::ClickEvent;

/// Application state shared across all request handlers.
///
/// Services are `Arc`-wrapped so the state stays cheap to clone per
/// request. The click sender feeds the background audit worker; handlers
/// use non-blocking `try_send` and drop the event when the queue is full.
#[derive(Clone)]
pub struct AppState {
    pub redirect_service: Arc<RedirectService>,
    pub click_service: Arc<ClickService>,
    pub campaign_service: Arc<CampaignService>,
    pub click_sender: mpsc::Sender<ClickEvent>,
}
