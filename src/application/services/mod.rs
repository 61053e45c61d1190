//! Business logic services for the application layer.

pub mod budget_service;
pub mod campaign_service;
pub mod click_service;
pub mod redirect_service;
pub mod spend_monitor;

pub use budget_service::BudgetService;
pub use campaign_service::CampaignService;
pub use click_service::ClickService;
pub use redirect_service::RedirectService;
pub use spend_monitor::SpendMonitor;
