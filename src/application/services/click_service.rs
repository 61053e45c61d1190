//! Click accounting service.

use std::sync::Arc;

use serde_json::json;

use crate::domain::repositories::{ClickOutcome, UrlRepository};
use crate::error::AppError;

/// Result of a successfully registered click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickRegistration {
    /// Post-increment click total.
    pub clicks: i64,
    /// True when this click reached the limit and completed the URL.
    pub limit_reached: bool,
}

/// Counts clicks against URL budgets.
///
/// All registration goes through the repository's atomic conditional
/// increment; this service only maps outcomes. There is no rollback: once
/// a click is registered it stays counted, whatever happens to the
/// response afterwards.
pub struct ClickService {
    urls: Arc<dyn UrlRepository>,
}

impl ClickService {
    /// Creates a new click service.
    pub fn new(urls: Arc<dyn UrlRepository>) -> Self {
        Self { urls }
    }

    /// Registers a click, treating exhaustion and absence as terminal
    /// errors.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the URL does not exist and
    /// [`AppError::Gone`] when it has no remaining capacity or is not
    /// active. Repository failures propagate as [`AppError::Internal`].
    pub async fn register_click(&self, url_id: i64) -> Result<ClickRegistration, AppError> {
        match self.urls.register_click(url_id).await? {
            ClickOutcome::Registered { clicks, completed } => Ok(ClickRegistration {
                clicks,
                limit_reached: completed,
            }),
            ClickOutcome::Exhausted => Err(AppError::gone(
                "URL has no remaining clicks",
                json!({"url_id": url_id}),
            )),
            ClickOutcome::NotFound => Err(AppError::not_found(
                "URL not found",
                json!({"url_id": url_id}),
            )),
        }
    }

    /// Registers a click, returning the raw outcome.
    ///
    /// For callers that handle exhaustion themselves, like the rotation
    /// path falling back to another candidate.
    pub async fn try_register(&self, url_id: i64) -> Result<ClickOutcome, AppError> {
        self.urls.register_click(url_id).await
    }

    /// Sum of remaining capacity over a campaign's active URLs.
    pub async fn active_remaining(&self, campaign_id: i64) -> Result<i64, AppError> {
        self.urls.active_remaining(campaign_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUrlRepository;

    #[tokio::test]
    async fn test_register_click_success() {
        let mut urls = MockUrlRepository::new();
        urls.expect_register_click()
            .withf(|id| *id == 5)
            .times(1)
            .returning(|_| {
                Ok(ClickOutcome::Registered {
                    clicks: 10,
                    completed: false,
                })
            });

        let service = ClickService::new(Arc::new(urls));
        let registration = service.register_click(5).await.unwrap();

        assert_eq!(registration.clicks, 10);
        assert!(!registration.limit_reached);
    }

    #[tokio::test]
    async fn test_register_click_reports_limit_reached() {
        let mut urls = MockUrlRepository::new();
        urls.expect_register_click().times(1).returning(|_| {
            Ok(ClickOutcome::Registered {
                clicks: 100,
                completed: true,
            })
        });

        let service = ClickService::new(Arc::new(urls));
        let registration = service.register_click(5).await.unwrap();

        assert!(registration.limit_reached);
    }

    #[tokio::test]
    async fn test_register_click_exhausted_maps_to_gone() {
        let mut urls = MockUrlRepository::new();
        urls.expect_register_click()
            .times(1)
            .returning(|_| Ok(ClickOutcome::Exhausted));

        let service = ClickService::new(Arc::new(urls));
        let err = service.register_click(5).await.unwrap_err();

        assert!(err.is_gone());
    }

    #[tokio::test]
    async fn test_register_click_missing_maps_to_not_found() {
        let mut urls = MockUrlRepository::new();
        urls.expect_register_click()
            .times(1)
            .returning(|_| Ok(ClickOutcome::NotFound));

        let service = ClickService::new(Arc::new(urls));
        let err = service.register_click(5).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_active_remaining_passthrough() {
        let mut urls = MockUrlRepository::new();
        urls.expect_active_remaining()
            .withf(|id| *id == 3)
            .times(1)
            .returning(|_| Ok(12_500));

        let service = ClickService::new(Arc::new(urls));
        assert_eq!(service.active_remaining(3).await.unwrap(), 12_500);
    }
}
