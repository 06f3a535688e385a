//! HTTP transport layer for the ExpenseLM SDK.

use crate::config::{ClientConfig, API_KEY_ENV, API_KEY_HEADER};
use crate::error::{ExpenseLmError, ExpenseLmResult};
use expenselm_core::{validate_json, Validate};
use reqwest::{header, Client, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

/// HTTP transport for making API requests.
///
/// Every call is a single GET. There is no retry: timeouts, connection
/// failures and error statuses are returned to the caller unchanged.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: Arc<ClientConfig>,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given configuration.
    pub fn new(config: Arc<ClientConfig>) -> ExpenseLmResult<Self> {
        // Idle connections are closed as soon as a call completes
        let client = Client::builder()
            .timeout(config.timeout)
            .pool_max_idle_per_host(0)
            .build()?;

        Ok(Self { client, config })
    }

    /// Header carrying the configured API key.
    fn api_key_header(&self) -> ExpenseLmResult<header::HeaderValue> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| ExpenseLmError::Config(format!("{} is not set", API_KEY_ENV)))?;

        let mut value = header::HeaderValue::from_str(api_key)
            .map_err(|_| ExpenseLmError::Config("Invalid API key format".to_string()))?;
        value.set_sensitive(true);
        Ok(value)
    }

    /// Build a URL for the given path.
    fn build_url(&self, path: &str) -> ExpenseLmResult<Url> {
        self.config
            .base_url
            .join(path)
            .map_err(ExpenseLmError::InvalidUrl)
    }

    /// Build the URL of a single resource, encoding `id` as one path segment.
    fn resource_url(&self, collection: &str, id: &str) -> ExpenseLmResult<Url> {
        let mut url = self.build_url(collection)?;
        url.path_segments_mut()
            .map_err(|_| ExpenseLmError::Config("Base URL cannot hold a path".to_string()))?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }

    /// Send the request and validate the response body into `T`.
    async fn execute<T>(
        &self,
        request: RequestBuilder,
        api_key: header::HeaderValue,
    ) -> ExpenseLmResult<T>
    where
        T: DeserializeOwned + Validate,
    {
        let response = request.header(API_KEY_HEADER, api_key).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    warn!(error = %e, "Failed to read error body");
                    format!("<unreadable body: {}>", e)
                }
            };
            warn!(status = status.as_u16(), "API returned error status");
            return Err(ExpenseLmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await?;
        let value = validate_json(&body)?;
        Ok(value)
    }

    /// Execute a GET request.
    pub async fn get<T>(&self, path: &str) -> ExpenseLmResult<T>
    where
        T: DeserializeOwned + Validate,
    {
        let api_key = self.api_key_header()?;
        let url = self.build_url(path)?;
        debug!(url = %url, "GET request");

        self.execute(self.client.get(url), api_key).await
    }

    /// Execute a GET request with query parameters.
    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> ExpenseLmResult<T>
    where
        T: DeserializeOwned + Validate,
        Q: Serialize + ?Sized,
    {
        let api_key = self.api_key_header()?;
        let url = self.build_url(path)?;
        debug!(url = %url, "GET request with query");

        self.execute(self.client.get(url).query(query), api_key)
            .await
    }

    /// Execute a GET request for a single resource within a collection.
    pub async fn get_resource<T>(&self, collection: &str, id: &str) -> ExpenseLmResult<T>
    where
        T: DeserializeOwned + Validate,
    {
        let api_key = self.api_key_header()?;
        let url = self.resource_url(collection, id)?;
        debug!(url = %url, "GET resource");

        self.execute(self.client.get(url), api_key).await
    }
}
