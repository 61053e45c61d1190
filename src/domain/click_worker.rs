//! Background worker persisting click audit rows.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

use crate::domain::click_event::ClickEvent;
use crate::domain::entities::NewClick;
use crate::domain::repositories::ClickLogRepository;

/// Drains the click channel and appends audit rows.
///
/// Insert failures are retried with exponential backoff; an event that
/// still fails after the retries is dropped with a warning. A dropped
/// event loses an audit row only; the click itself was counted before the
/// event was queued.
pub async fn run_click_worker(
    mut rx: mpsc::Receiver<ClickEvent>,
    click_log: Arc<dyn ClickLogRepository>,
) {
    while let Some(event) = rx.recv().await {
        let click = NewClick::from(event);

        let strategy = ExponentialBackoff::from_millis(50)
            .max_delay(Duration::from_secs(2))
            .map(jitter)
            .take(3);

        let result = Retry::spawn(strategy, || {
            let click = click.clone();
            let click_log = Arc::clone(&click_log);
            async move { click_log.insert(click).await }
        })
        .await;

        if let Err(e) = result {
            tracing::warn!(
                url_id = click.url_id,
                campaign_id = click.campaign_id,
                error = %e,
                "dropping click audit row after retries"
            );
        }
    }

    tracing::debug!("click channel closed, audit worker stopping");
}
