//! Connection settings for the hosting provider API.

use crate::error::{ApiError, ApiResult};
use url::Url;

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "https://developers.hostinger.com";

/// Configuration for [`crate::HttpHostingApi`].
#[derive(Clone)]
pub struct ApiConfig {
    /// Base URL every request path is appended to.
    pub base_url: Url,
    /// Bearer token sent with every request.
    pub token: String,
}

impl ApiConfig {
    /// Create a configuration, rejecting an unparsable URL or an empty token.
    pub fn new(base_url: &str, token: impl Into<String>) -> ApiResult<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ApiError::Config("API token must not be empty".to_string()));
        }

        Ok(Self {
            base_url: Url::parse(base_url)?,
            token,
        })
    }

    /// Join `path` onto the base URL by concatenation, keeping any path prefix
    /// the base URL carries.
    pub fn endpoint(&self, path: &str) -> ApiResult<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}{path}"))?)
    }
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url.as_str())
            .field("token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_token() {
        let result = ApiConfig::new(DEFAULT_BASE_URL, "  ");
        assert!(matches!(result, Err(ApiError::Config(_))));
    }

    #[test]
    fn test_rejects_invalid_url() {
        let result = ApiConfig::new("not a url", "token");
        assert!(matches!(result, Err(ApiError::InvalidUrl(_))));
    }

    #[test]
    fn test_endpoint_keeps_path_prefix() {
        let config = ApiConfig::new("https://api.example.com/v2/", "token").unwrap();
        let url = config.endpoint("/domains/example.com").unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v2/domains/example.com");
    }

    #[test]
    fn test_endpoint_keeps_query() {
        let config = ApiConfig::new("http://localhost:8080", "token").unwrap();
        let url = config.endpoint("/api/vps/v1/metrics?period=24h").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/vps/v1/metrics?period=24h");
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ApiConfig::new(DEFAULT_BASE_URL, "secret-token").unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("<redacted>"));
    }
}
