//! Custom path slug validation.

use crate::error::AppError;
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

/// Compiled regex for custom path validation.
static CUSTOM_PATH_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9-]+$").unwrap());

/// Validates an operator-provided custom path slug.
///
/// Slugs are served under `/views/{slug}`, so they never collide with
/// system routes; validation is about shape only.
///
/// # Rules
///
/// - Length: 3-32 characters
/// - Allowed characters: lowercase letters, digits, hyphens
/// - Cannot start or end with a hyphen
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_custom_path(slug: &str) -> Result<(), AppError> {
    if slug.len() < 3 || slug.len() > 32 {
        return Err(AppError::bad_request(
            "Custom path must be 3-32 characters",
            json!({ "provided_length": slug.len() }),
        ));
    }

    if !CUSTOM_PATH_REGEX.is_match(slug) {
        return Err(AppError::bad_request(
            "Custom path can only contain lowercase letters, digits, and hyphens",
            json!({ "custom_path": slug }),
        ));
    }

    if slug.starts_with('-') || slug.ends_with('-') {
        return Err(AppError::bad_request(
            "Custom path cannot start or end with a hyphen",
            json!({ "custom_path": slug }),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_slugs() {
        for slug in ["abc", "spring-sale", "promo2025", "x1-2-3", "summer-sale-2025-q3"] {
            assert!(validate_custom_path(slug).is_ok(), "{slug} should pass");
        }
    }

    #[test]
    fn test_length_bounds() {
        assert!(validate_custom_path("ab").is_err());
        assert!(validate_custom_path(&"a".repeat(33)).is_err());
        assert!(validate_custom_path(&"a".repeat(32)).is_ok());
    }

    #[test]
    fn test_rejects_uppercase_and_specials() {
        let result = validate_custom_path("SpringSale");
        assert!(result.unwrap_err().to_string().contains("lowercase"));

        assert!(validate_custom_path("spring_sale").is_err());
        assert!(validate_custom_path("spring sale").is_err());
        assert!(validate_custom_path("sale@2025").is_err());
    }

    #[test]
    fn test_rejects_edge_hyphens() {
        let result = validate_custom_path("-spring");
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("cannot start or end")
        );
        assert!(validate_custom_path("spring-").is_err());
    }

    #[test]
    fn test_rejects_empty() {
        assert!(validate_custom_path("").is_err());
    }
}
