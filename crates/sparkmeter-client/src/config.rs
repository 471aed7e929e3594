//! Provider configuration.

use std::time::Duration;

use crate::client::ClientOptions;

/// Environment variable holding the provider base URL.
pub const ENV_API_URL: &str = "SPARKMETER_API_URL";

/// Environment variable holding the provider API token.
pub const ENV_API_TOKEN: &str = "SPARKMETER_API_TOKEN";

/// Environment variable holding an optional request timeout in seconds.
pub const ENV_TIMEOUT_SECONDS: &str = "SPARKMETER_TIMEOUT_SECONDS";

/// Provider configuration loaded from environment variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Provider base URL (empty if unset).
    pub api_url: String,

    /// Provider API token (empty if unset).
    pub api_token: String,

    /// Request timeout in seconds. `None` waits indefinitely.
    pub timeout_seconds: Option<u64>,
}

impl ProviderConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset values fall back to an empty string and are not validated.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_url = lookup(ENV_API_URL).unwrap_or_default();
        let api_token = lookup(ENV_API_TOKEN).unwrap_or_default();
        let timeout_seconds = lookup(ENV_TIMEOUT_SECONDS).and_then(|s| s.trim().parse().ok());

        if api_url.is_empty() {
            tracing::warn!(var = ENV_API_URL, "Provider base URL is not set");
        }
        if api_token.is_empty() {
            tracing::warn!(var = ENV_API_TOKEN, "Provider API token is not set");
        }

        Self {
            api_url,
            api_token,
            timeout_seconds,
        }
    }

    /// Client options derived from this configuration.
    #[must_use]
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            timeout: self.timeout_seconds.map(Duration::from_secs),
        }
    }
}
