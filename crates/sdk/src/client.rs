//! Main client for the ExpenseLM SDK.

use crate::api::*;
use crate::config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use crate::error::ExpenseLmResult;
use crate::transport::HttpTransport;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Main client for interacting with the ExpenseLM API.
#[derive(Debug, Clone)]
pub struct ExpenseLmClient {
    config: Arc<ClientConfig>,
    pub(crate) http: HttpTransport,
}

impl ExpenseLmClient {
    /// Create a new client builder.
    pub fn builder() -> ExpenseLmClientBuilder {
        ExpenseLmClientBuilder::new()
    }

    /// Create a client from configuration.
    pub fn from_config(config: ClientConfig) -> ExpenseLmResult<Self> {
        let config = Arc::new(config);
        let http = HttpTransport::new(config.clone())?;

        Ok(Self { config, http })
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the expenses API.
    pub fn expenses(&self) -> ExpensesApi<'_> {
        ExpensesApi::new(self)
    }

    /// Get the subscriptions API.
    pub fn subscriptions(&self) -> SubscriptionsApi<'_> {
        SubscriptionsApi::new(self)
    }

    /// Get the statistics API.
    pub fn stats(&self) -> StatsApi<'_> {
        StatsApi::new(self)
    }
}

/// Builder for creating an ExpenseLmClient.
pub struct ExpenseLmClientBuilder {
    base_url: Option<String>,
    api_key: Option<String>,
    timeout: Duration,
}

impl ExpenseLmClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the base URL of the ExpenseLM API. Defaults to the hosted API.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the API key for authentication.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the client.
    pub fn build(self) -> ExpenseLmResult<ExpenseLmClient> {
        let base_url_str = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let base_url = Url::parse(&base_url_str)?;

        let config = ClientConfig {
            base_url,
            api_key: self.api_key,
            timeout: self.timeout,
        };

        ExpenseLmClient::from_config(config)
    }
}

impl Default for ExpenseLmClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
