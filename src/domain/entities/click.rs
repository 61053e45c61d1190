//! Click audit entities.
//!
//! The audit log is informational. Click accounting lives on the URL row
//! itself; losing an audit row never changes what was billed.

use chrono::{DateTime, Utc};

/// A persisted click audit row.
#[derive(Debug, Clone)]
pub struct ClickRecord {
    pub id: i64,
    pub url_id: i64,
    pub campaign_id: i64,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
    pub clicked_at: DateTime<Utc>,
}

/// Request metadata captured for one registered click.
#[derive(Debug, Clone, PartialEq)]
pub struct NewClick {
    pub url_id: i64,
    pub campaign_id: i64,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
}

impl NewClick {
    pub fn new(url_id: i64, campaign_id: i64) -> Self {
        Self {
            url_id,
            campaign_id,
            ip: None,
            user_agent: None,
            referer: None,
        }
    }

    pub fn with_request_meta(
        mut self,
        ip: Option<String>,
        user_agent: Option<String>,
        referer: Option<String>,
    ) -> Self {
        self.ip = ip;
        self.user_agent = user_agent;
        self.referer = referer;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_click_carries_meta() {
        let click = NewClick::new(5, 1).with_request_meta(
            Some("203.0.113.9".to_string()),
            Some("curl/8.5".to_string()),
            None,
        );
        assert_eq!(click.url_id, 5);
        assert_eq!(click.campaign_id, 1);
        assert_eq!(click.ip.as_deref(), Some("203.0.113.9"));
        assert_eq!(click.user_agent.as_deref(), Some("curl/8.5"));
        assert!(click.referer.is_none());
    }
}
