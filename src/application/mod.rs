//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and business rules. Services consume repository traits and provide
//! a clean API for HTTP handlers and the background scheduler.
//!
//! # Available Services
//!
//! - [`services::redirect_service::RedirectService`] - Redirect resolution and rotation
//! - [`services::click_service::ClickService`] - Click accounting against URL budgets
//! - [`services::campaign_service::CampaignService`] - Campaign/URL administration
//! - [`services::spend_monitor::SpendMonitor`] - Daily-spend reads with per-tick caching
//! - [`services::budget_service::BudgetService`] - Budget recalculation at recheck
//! - [`scheduler::AutoManager`] - Periodic pause/activate driver

pub mod scheduler;
pub mod services;
