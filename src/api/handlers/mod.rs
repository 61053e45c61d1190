//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod campaigns;
pub mod health;
pub mod redirect;
pub mod urls;

pub use campaigns::{
    campaign_stats_handler, create_campaign_handler, create_url_handler, get_campaign_handler,
    list_campaigns_handler, update_campaign_handler,
};
pub use health::health_handler;
pub use redirect::{
    bridge_redirect_handler, custom_path_handler, direct_redirect_handler,
    rotation_redirect_handler,
};
pub use urls::{delete_url_handler, update_url_handler};
