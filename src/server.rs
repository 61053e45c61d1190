//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, worker and scheduler spawning, and Axum
//! server lifecycle.

use crate::application::scheduler::{AutoManager, SchedulerPolicy};
use crate::application::services::{
    BudgetService, CampaignService, ClickService, RedirectService, SpendMonitor,
};
use crate::config::Config;
use crate::domain::click_worker::run_click_worker;
use crate::infrastructure::persistence::{
    PgBudgetLogRepository, PgCampaignRepository, PgClickLogRepository, PgPauseRepository,
    PgUrlRepository,
};
use crate::infrastructure::platform::{AdPlatform, HttpAdPlatform};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Ad-platform client
/// - Background click audit worker
/// - Auto-management scheduler
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - The platform client cannot be built
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    let pool = Arc::new(pool);
    let campaign_repository = Arc::new(PgCampaignRepository::new(pool.clone()));
    let url_repository = Arc::new(PgUrlRepository::new(pool.clone()));
    let pause_repository = Arc::new(PgPauseRepository::new(pool.clone()));
    let budget_log_repository = Arc::new(PgBudgetLogRepository::new(pool.clone()));
    let click_log_repository = Arc::new(PgClickLogRepository::new(pool.clone()));

    let platform: Arc<dyn AdPlatform> = Arc::new(
        HttpAdPlatform::new(
            config.platform_api_url.clone(),
            config.platform_api_token.clone(),
            Duration::from_secs(config.platform_timeout_secs),
        )
        .context("Failed to build ad-platform client")?,
    );

    let (click_tx, click_rx) = mpsc::channel(config.click_queue_capacity);
    tokio::spawn(run_click_worker(click_rx, click_log_repository));
    tracing::info!("Click audit worker started");

    let click_service = Arc::new(ClickService::new(url_repository.clone()));
    let redirect_service = Arc::new(RedirectService::new(
        campaign_repository.clone(),
        url_repository.clone(),
        click_service.clone(),
    ));
    let campaign_service = Arc::new(CampaignService::new(
        campaign_repository.clone(),
        url_repository.clone(),
    ));

    let spend_monitor = Arc::new(SpendMonitor::new(platform.clone()));
    let budget_service = Arc::new(BudgetService::new(
        url_repository.clone(),
        budget_log_repository,
        pause_repository.clone(),
        spend_monitor.clone(),
        platform.clone(),
    ));
    let auto_manager = Arc::new(AutoManager::new(
        campaign_repository,
        url_repository,
        pause_repository,
        spend_monitor,
        budget_service,
        platform,
        SchedulerPolicy {
            spend_threshold: config.spend_threshold,
            pause_click_threshold: config.pause_click_threshold,
            activate_click_threshold: config.activate_click_threshold,
        },
    ));
    tokio::spawn(auto_manager.run(Duration::from_secs(config.scheduler_interval_secs)));

    let state = AppState {
        redirect_service,
        click_service,
        campaign_service,
        click_sender: click_tx,
    };

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .await?;

    Ok(())
}
