//! Click event model for asynchronous audit logging.

use crate::domain::entities::NewClick;

/// An in-memory representation of a resolved click for async processing.
///
/// Used to pass click information from HTTP handlers to the background
/// worker via a channel. This decouples the HTTP response from the audit
/// insert, keeping redirects fast.
///
/// # Design
///
/// - Carries the already-resolved url and campaign ids, so the worker
///   never repeats a lookup
/// - All client metadata is optional to handle missing headers gracefully
/// - Cloneable for sending across async boundaries
///
/// # Usage Flow
///
/// 1. Created in a redirect handler after the click was registered
/// 2. Sent to the channel (non-blocking `try_send`)
/// 3. Processed by [`crate::domain::click_worker::run_click_worker`]
/// 4. Converted to [`crate::domain::entities::NewClick`] for persistence
#[derive(Debug, Clone)]
pub struct ClickEvent {
    pub url_id: i64,
    pub campaign_id: i64,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
}

impl ClickEvent {
    /// Creates a new click event.
    ///
    /// # Arguments
    ///
    /// - `url_id` - The tracked URL the click was counted against
    /// - `campaign_id` - The owning campaign
    /// - `ip` - Optional client IP address
    /// - `user_agent` - Optional User-Agent header
    /// - `referer` - Optional Referer header
    pub fn new(
        url_id: i64,
        campaign_id: i64,
        ip: Option<String>,
        user_agent: Option<&str>,
        referer: Option<&str>,
    ) -> Self {
        Self {
            url_id,
            campaign_id,
            ip,
            user_agent: user_agent.map(|s| s.to_string()),
            referer: referer.map(|s| s.to_string()),
        }
    }
}

impl From<ClickEvent> for NewClick {
    fn from(event: ClickEvent) -> Self {
        NewClick {
            url_id: event.url_id,
            campaign_id: event.campaign_id,
            ip: event.ip,
            user_agent: event.user_agent,
            referer: event.referer,
        }
    }
}
