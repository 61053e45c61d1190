//! Core domain entities representing the business data model.
//!
//! This module contains the fundamental data structures that represent the
//! core concepts of the click routing service. Entities are plain data
//! structures without business logic beyond small derived predicates.
//!
//! # Entity Types
//!
//! - [`Campaign`] - A marketing campaign, optionally linked to an ad platform
//! - [`TrackedUrl`] - A destination URL with its click budget
//! - [`SpendPause`] - A daily-spend pause record for a linked campaign
//! - [`BudgetLogEntry`] - One URL's contribution to a recalculated budget
//! - [`ClickRecord`] - A click audit row
//!
//! # Design Pattern
//!
//! Entities follow the "New Type" pattern with separate structs for creation:
//! - `NewCampaign`, `NewUrl`, `NewClick`, `NewBudgetLogEntry` - For creating
//!   new records
//! - `CampaignPatch` - For partial updates

pub mod budget_log;
pub mod campaign;
pub mod click;
pub mod pause;
pub mod url;

pub use budget_log::{BudgetLogEntry, NewBudgetLogEntry};
pub use campaign::{Campaign, CampaignPatch, NewCampaign, RedirectMethod};
pub use click::{ClickRecord, NewClick};
pub use pause::SpendPause;
pub use url::{NewUrl, TrackedUrl, UrlStatus};
