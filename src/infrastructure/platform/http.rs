//! HTTP implementation of the ad-platform client.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::{Client, Response, StatusCode};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::{AdPlatform, PlatformError};

#[derive(Debug, Serialize)]
struct BudgetRequest {
    daily_amount: Decimal,
    active_until: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct SpendReport {
    total: Option<Decimal>,
}

/// JSON client for the ad-delivery platform API.
///
/// Every request carries a bearer token and the configured timeout.
pub struct HttpAdPlatform {
    client: Client,
    base_url: String,
    token: String,
}

impl HttpAdPlatform {
    /// Creates a client against a base URL like `https://ads.example.com/v2`.
    pub fn new(base_url: String, token: String, timeout: Duration) -> Result<Self, PlatformError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    fn campaign_url(&self, platform_campaign_id: &str, action: &str) -> String {
        format!(
            "{}/campaigns/{}/{}",
            self.base_url, platform_campaign_id, action
        )
    }

    async fn check(response: Response) -> Result<Response, PlatformError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(PlatformError::Api {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl AdPlatform for HttpAdPlatform {
    async fn pause_campaign(&self, platform_campaign_id: &str) -> Result<(), PlatformError> {
        debug!(platform_campaign_id, "pausing campaign on platform");
        let response = self
            .client
            .post(self.campaign_url(platform_campaign_id, "pause"))
            .bearer_auth(&self.token)
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }

    async fn activate_campaign(&self, platform_campaign_id: &str) -> Result<(), PlatformError> {
        debug!(platform_campaign_id, "activating campaign on platform");
        let response = self
            .client
            .post(self.campaign_url(platform_campaign_id, "activate"))
            .bearer_auth(&self.token)
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }

    async fn set_budget(
        &self,
        platform_campaign_id: &str,
        daily_amount: Decimal,
        active_until: DateTime<Utc>,
    ) -> Result<(), PlatformError> {
        debug!(platform_campaign_id, %daily_amount, "setting campaign budget");
        let response = self
            .client
            .put(self.campaign_url(platform_campaign_id, "budget"))
            .bearer_auth(&self.token)
            .json(&BudgetRequest {
                daily_amount,
                active_until,
            })
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }

    async fn spend(
        &self,
        platform_campaign_id: &str,
        date_from: NaiveDate,
        date_to: NaiveDate,
    ) -> Result<Option<Decimal>, PlatformError> {
        let response = self
            .client
            .get(self.campaign_url(platform_campaign_id, "spend"))
            .bearer_auth(&self.token)
            .query(&[
                ("date_from", date_from.to_string()),
                ("date_to", date_to.to_string()),
            ])
            .send()
            .await?;

        // No report for the range reads as 404.
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let report: SpendReport = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| PlatformError::Decode(e.to_string()))?;

        Ok(report.total)
    }
}
