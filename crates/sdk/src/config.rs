//! Configuration types for the ExpenseLM SDK.

use std::time::Duration;
use url::Url;

/// Base address of the hosted ExpenseLM API.
pub const DEFAULT_BASE_URL: &str = "https://api.expenselm.ai";

/// Request timeout applied to every call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "EXPENSELM_API_KEY";

/// Request header carrying the API key.
pub const API_KEY_HEADER: &str = "expenselm_api_key";

/// Configuration for the ExpenseLM client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the ExpenseLM API.
    pub base_url: Url,
    /// API key sent with every request. Calls fail before any I/O when unset.
    pub api_key: Option<String>,
    /// Request timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Create a new configuration with the given base URL.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Configuration for the hosted API with the key read from `EXPENSELM_API_KEY`.
    ///
    /// The variable is read once here; an unset or blank value leaves
    /// `api_key` empty and every call reports a configuration error.
    pub fn from_env() -> Self {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty());
        Self::from_api_key(api_key)
    }

    fn from_api_key(api_key: Option<String>) -> Self {
        Self {
            api_key,
            ..Self::default()
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        // The constant is a valid absolute URL
        Self::new(Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"))
    }
}
