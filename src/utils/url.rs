//! URL utilities for consistent URL handling
//!
//! This module provides utilities for normalizing URLs to prevent issues
//! with trailing slashes when constructing gateway endpoints.

/// Normalize a base URL by removing trailing slashes
///
/// # Examples
///
/// ```
/// use causette::utils::url::normalize_base_url;
///
/// assert_eq!(normalize_base_url("http://127.0.0.1:5001"), "http://127.0.0.1:5001");
/// assert_eq!(normalize_base_url("http://127.0.0.1:5001/"), "http://127.0.0.1:5001");
/// ```
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}

/// Construct a complete endpoint URL from a base URL and endpoint path,
/// ensuring there are no double slashes in the result.
///
/// # Examples
///
/// ```
/// use causette::utils::url::construct_api_url;
///
/// assert_eq!(
///     construct_api_url("http://127.0.0.1:5001", "api/chat"),
///     "http://127.0.0.1:5001/api/chat"
/// );
/// assert_eq!(
///     construct_api_url("http://127.0.0.1:5001/", "/api/models"),
///     "http://127.0.0.1:5001/api/models"
/// );
/// ```
pub fn construct_api_url(base_url: &str, endpoint: &str) -> String {
    let normalized_base = normalize_base_url(base_url);
    let endpoint = endpoint.trim_start_matches('/');
    format!("{}/{}", normalized_base, endpoint)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(
            normalize_base_url("http://gateway.example:5001"),
            "http://gateway.example:5001"
        );
        assert_eq!(
            normalize_base_url("http://gateway.example:5001/"),
            "http://gateway.example:5001"
        );
        assert_eq!(
            normalize_base_url("http://gateway.example:5001///"),
            "http://gateway.example:5001"
        );
        assert_eq!(normalize_base_url(""), "");
    }

    #[test]
    fn test_construct_api_url() {
        assert_eq!(
            construct_api_url("http://gateway.example:5001", "api/chat"),
            "http://gateway.example:5001/api/chat"
        );
        assert_eq!(
            construct_api_url("http://gateway.example:5001/", "api/chat"),
            "http://gateway.example:5001/api/chat"
        );
        assert_eq!(
            construct_api_url("http://gateway.example:5001", "/api/models"),
            "http://gateway.example:5001/api/models"
        );
        assert_eq!(
            construct_api_url("http://gateway.example:5001///", "api/models"),
            "http://gateway.example:5001/api/models"
        );
    }
}
