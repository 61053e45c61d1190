//! Target URL normalization.
//!
//! Advertiser target URLs are stored in a canonical form so the same
//! destination always compares equal and redirects never carry fragments.

use url::Url;

/// Errors that can occur during target URL normalization.
#[derive(Debug, thiserror::Error)]
pub enum TargetUrlError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS targets are allowed")]
    UnsupportedScheme,

    #[error("Failed to normalize URL: {0}")]
    NormalizationFailed(String),
}

/// Normalizes an advertiser target URL to a canonical form.
///
/// # Normalization Rules
///
/// 1. **Scheme**: only `http` and `https`; anything else is rejected
/// 2. **Hostname**: lowercased
/// 3. **Default ports**: removed (80 for HTTP, 443 for HTTPS)
/// 4. **Fragments**: removed
/// 5. **Query parameters**: preserved as-is (tracking parameters matter)
/// 6. **Path**: preserved with case sensitivity
///
/// Rejecting non-HTTP(S) schemes also keeps `javascript:`, `data:` and
/// `file:` payloads out of redirect responses.
///
/// # Errors
///
/// Returns [`TargetUrlError::InvalidFormat`] for malformed URLs and
/// [`TargetUrlError::UnsupportedScheme`] for non-HTTP(S) schemes.
pub fn normalize_target_url(input: &str) -> Result<String, TargetUrlError> {
    let mut url = Url::parse(input).map_err(|e| TargetUrlError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(TargetUrlError::UnsupportedScheme),
    }

    if let Some(host) = url.host_str() {
        let host_lowercase = host.to_ascii_lowercase();
        url.set_host(Some(&host_lowercase)).map_err(|_| {
            TargetUrlError::NormalizationFailed("Failed to set normalized host".to_string())
        })?;
    }

    url.set_fragment(None);

    let is_default_port = matches!(
        (url.scheme(), url.port()),
        ("http", Some(80)) | ("https", Some(443))
    );
    if is_default_port {
        url.set_port(None).map_err(|_| {
            TargetUrlError::NormalizationFailed("Failed to remove default port".to_string())
        })?;
    }

    Ok(url.to_string())
}
