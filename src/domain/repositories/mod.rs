//! Repository trait definitions for the domain layer.
//!
//! This module defines the repository interfaces (traits) that abstract data
//! access operations following the Repository pattern. These traits are
//! implemented by concrete repositories in the infrastructure layer.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - PostgreSQL implementations live in `crate::infrastructure::persistence`
//! - In-memory implementations (same contracts) back DB-less tests
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`CampaignRepository`] - Campaign CRUD and scheduler listing
//! - [`UrlRepository`] - Tracked URL CRUD and atomic click accounting
//! - [`PauseRepository`] - Daily-spend pause records
//! - [`BudgetLogRepository`] - Append-only budget recalculation log
//! - [`ClickLogRepository`] - Append-only click audit log

pub mod budget_log_repository;
pub mod campaign_repository;
pub mod click_log_repository;
pub mod pause_repository;
pub mod url_repository;

pub use budget_log_repository::BudgetLogRepository;
pub use campaign_repository::CampaignRepository;
pub use click_log_repository::ClickLogRepository;
pub use pause_repository::PauseRepository;
pub use url_repository::{ClickOutcome, UrlRepository};

#[cfg(test)]
pub use budget_log_repository::MockBudgetLogRepository;
#[cfg(test)]
pub use campaign_repository::MockCampaignRepository;
#[cfg(test)]
pub use click_log_repository::MockClickLogRepository;
#[cfg(test)]
pub use pause_repository::MockPauseRepository;
#[cfg(test)]
pub use url_repository::MockUrlRepository;
