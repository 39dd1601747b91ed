//! Service location and request settings.

use std::time::Duration;

/// Service base URL used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Environment variable naming the service base URL.
pub const APP_URL_ENV: &str = "APP_URL";

/// Where and how to reach the verification service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL without the endpoint path.
    pub base_url: String,
    /// Whole-request timeout. `None` leaves the transport default in place.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            request_timeout: None,
        }
    }
}

impl ClientConfig {
    /// Picks the base URL by precedence: explicit value, then environment,
    /// then config file, then [`DEFAULT_API_URL`]. Blank values are skipped.
    pub fn resolve(
        explicit: Option<&str>,
        environment: Option<&str>,
        config_file: Option<&str>,
    ) -> Self {
        let base_url = [explicit, environment, config_file]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|url| !url.is_empty())
            .unwrap_or(DEFAULT_API_URL)
            .to_string();
        Self {
            base_url,
            request_timeout: None,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Full URL of the check endpoint.
    pub fn endpoint(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            crate::client::EMAIL_CHECK_PATH
        )
    }
}
