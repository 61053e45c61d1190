//! Utility functions for URL processing and slug validation.
//!
//! This module provides helper functions used across the application:
//!
//! - [`url_norm`] - Target URL normalization and sanitization
//! - [`slug`] - Custom path slug validation

pub mod slug;
pub mod url_norm;
