//! Client configuration options.

use std::time::Duration;

use crate::auth::TokenManager;

/// Default number of items requested per list page.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Configuration for the Littlepay client.
///
/// # Example
///
/// ```
/// use littlepay_rs::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::default()
///     .with_timeout(Duration::from_secs(60))
///     .with_user_agent("my-app/1.0")
///     .with_refresh_margin(1);
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout
    pub timeout: Duration,
    /// User-Agent header value
    pub user_agent: String,
    /// Seconds before expiry at which a token stops being used
    pub refresh_margin_secs: i64,
    /// Items requested per list page
    pub page_size: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: format!("littlepay-rs/{}", env!("CARGO_PKG_VERSION")),
            refresh_margin_secs: 60,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
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

    /// Set the token refresh margin in seconds (at least 1).
    pub fn with_refresh_margin(mut self, secs: i64) -> Self {
        self.refresh_margin_secs = secs.max(TokenManager::MIN_MARGIN_SECS);
        self
    }

    /// Set the number of items requested per list page.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub(crate) fn refresh_margin(&self) -> chrono::Duration {
        let secs = self.refresh_margin_secs.max(TokenManager::MIN_MARGIN_SECS);
        chrono::Duration::try_seconds(secs).unwrap_or(chrono::Duration::MAX)
    }
}
