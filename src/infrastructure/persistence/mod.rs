//! Repository implementations.
//!
//! Concrete implementations of domain repository traits: SQLx-backed
//! PostgreSQL repositories for production and in-memory equivalents with
//! the same contracts for DB-less tests.
//!
//! # PostgreSQL
//!
//! - [`PgCampaignRepository`] - Campaign storage and retrieval
//! - [`PgUrlRepository`] - Tracked URLs and atomic click accounting
//! - [`PgPauseRepository`] - Daily-spend pause records
//! - [`PgBudgetLogRepository`] - Budget recalculation log
//! - [`PgClickLogRepository`] - Click audit log
//!
//! # In-memory
//!
//! - [`MemoryCampaignRepository`], [`MemoryUrlRepository`],
//!   [`MemoryPauseRepository`], [`MemoryBudgetLogRepository`],
//!   [`MemoryClickLogRepository`]

pub mod memory;
pub mod pg_budget_log_repository;
pub mod pg_campaign_repository;
pub mod pg_click_log_repository;
pub mod pg_pause_repository;
pub mod pg_url_repository;

pub use memory::{
    MemoryBudgetLogRepository, MemoryCampaignRepository, MemoryClickLogRepository,
    MemoryPauseRepository, MemoryUrlRepository,
};
pub use pg_budget_log_repository::PgBudgetLogRepository;
pub use pg_campaign_repository::PgCampaignRepository;
pub use pg_click_log_repository::PgClickLogRepository;
pub use pg_pause_repository::PgPauseRepository;
pub use pg_url_repository::PgUrlRepository;
