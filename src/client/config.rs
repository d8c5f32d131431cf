//! Client configuration options.

use std::time::Duration;

/// Base URL of the Up API.
pub const BASE_URL: &str = "https://api.up.com.au/api/v1";

/// Default number of records requested per page of a paginated resource.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Environment variable read by `from_env` constructors.
pub const TOKEN_ENV_VAR: &str = "UP_TOKEN";

/// Configuration for the Up client.
///
/// # Example
///
/// ```
/// use up_bank::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::default()
///     .with_timeout(Duration::from_secs(60))
///     .with_user_agent("my-app/1.0")
///     .with_page_size(50);
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL every endpoint path is appended to
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// User-Agent header value
    pub user_agent: String,
    /// Page size used by listing calls that do not set one
    pub page_size: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: format!("up-bank-rs/{} (Rust)", env!("CARGO_PKG_VERSION")),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the client at a different API root, e.g. a mock server.
    ///
    /// A trailing slash is removed so that endpoint paths join cleanly.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the default page size for listing calls.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://api.up.com.au/api/v1");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.page_size, 20);
        assert!(config.user_agent.starts_with("up-bank-rs/"));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let config = ClientConfig::new().with_base_url("http://127.0.0.1:8080/api/v1/");
        assert_eq!(config.base_url, "http://127.0.0.1:8080/api/v1");
    }
}
