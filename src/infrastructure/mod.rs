//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for data persistence and the upstream ad
//! platform.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL and in-memory repository implementations
//! - [`platform`] - Ad-delivery platform client (trait + HTTP implementation)

pub mod persistence;
pub mod platform;
