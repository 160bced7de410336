//! HTTP client for the catalog API's `products` and `availability` endpoints.

mod endpoint;

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use stockboard_core::{AppConfig, AvailabilityRecord, DecodeMode, ProductRecord};

use crate::error::FetchError;
use crate::retry::{retry_with_backoff, RetryPolicy};
use crate::shape::{decode_records, Resource, ResponseShape, ValidatedProduct};

#[cfg(test)]
use endpoint::resource_url;

/// Request header the catalog API reads to decide whether to inject failures.
pub const FORCE_ERROR_MODE_HEADER: &str = "x-force-error-mode";

/// Knobs for [`ApiClient`] that do not depend on where the API lives.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Sent as the `x-force-error-mode` header on every request.
    pub force_error_mode: String,
    pub decode_mode: DecodeMode,
    pub retry: RetryPolicy,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: "stockboard/0.1 (inventory-board)".to_string(),
            force_error_mode: "none".to_string(),
            decode_mode: DecodeMode::Lenient,
            retry: RetryPolicy::default(),
        }
    }
}

impl From<&AppConfig> for ClientOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            timeout_secs: config.request_timeout_secs,
            user_agent: config.user_agent.clone(),
            force_error_mode: config.force_error_mode.clone(),
            decode_mode: config.decode_mode,
            retry: RetryPolicy {
                max_retries: config.max_retries,
                backoff_base_ms: config.retry_backoff_base_ms,
            },
        }
    }
}

/// Client for the catalog API.
///
/// Non-200 responses and transport failures are returned as errors straight
/// away. Bodies that are empty or fit none of the expected shapes are
/// re-requested according to the configured [`RetryPolicy`].
pub struct ApiClient {
    client: Client,
    api_root: String,
    force_error_mode: String,
    decode_mode: DecodeMode,
    retry: RetryPolicy,
}

impl ApiClient {
    /// Creates a client rooted at `api_root` (e.g. `https://bad-api-assignment.reaktor.com`).
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidApiRoot`] if `api_root` is not an absolute
    /// URL, or [`FetchError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed.
    pub fn new(api_root: &str, options: ClientOptions) -> Result<Self, FetchError> {
        let parsed = reqwest::Url::parse(api_root).map_err(|e| FetchError::InvalidApiRoot {
            api_root: api_root.to_owned(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(FetchError::InvalidApiRoot {
                api_root: api_root.to_owned(),
                reason: "URL cannot be used as a base".to_owned(),
            });
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(options.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            api_root: api_root.trim_end_matches('/').to_owned(),
            force_error_mode: options.force_error_mode,
            decode_mode: options.decode_mode,
            retry: options.retry,
        })
    }

    /// Builds a client from the application config.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, FetchError> {
        Self::new(&config.api_root, ClientOptions::from(config))
    }

    #[must_use]
    pub fn decode_mode(&self) -> DecodeMode {
        self.decode_mode
    }

    /// Fetches the product list for one category.
    ///
    /// Every returned record has an empty `availability`. Strict mode also
    /// requires every product field, `color` included.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::fetch`].
    pub async fn fetch_products(&self, category: &str) -> Result<Vec<ProductRecord>, FetchError> {
        let url = endpoint::resource_url(&self.api_root, "products", category);
        let shapes = Resource::Products.shapes(self.decode_mode);
        let mut products: Vec<ProductRecord> = match self.decode_mode {
            DecodeMode::Lenient => self.fetch(&url, shapes).await?,
            DecodeMode::Strict => self
                .fetch::<ValidatedProduct>(&url, shapes)
                .await?
                .into_iter()
                .map(ProductRecord::from)
                .collect(),
        };
        for product in &mut products {
            product.availability.clear();
        }
        Ok(products)
    }

    /// Fetches the raw availability feed for one manufacturer.
    ///
    /// Ids are returned as the API sends them; lower-casing and in-stock
    /// extraction happen when the feed is indexed.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::fetch`].
    pub async fn fetch_availability(
        &self,
        manufacturer: &str,
    ) -> Result<Vec<AvailabilityRecord>, FetchError> {
        let url = endpoint::resource_url(&self.api_root, "availability", manufacturer);
        self.fetch(&url, Resource::Availability.shapes(self.decode_mode))
            .await
    }

    /// GETs `url` and decodes the body with the first matching shape.
    ///
    /// # Errors
    ///
    /// - [`FetchError::UnexpectedStatus`] — any status other than 200 (not retried).
    /// - [`FetchError::Http`] — network, TLS, or timeout failure (not retried).
    /// - [`FetchError::MalformedPayload`] — the body stayed malformed after
    ///   all retries.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        url: &str,
        shapes: &[ResponseShape],
    ) -> Result<Vec<T>, FetchError> {
        let records =
            retry_with_backoff(self.retry, url, || self.fetch_once::<T>(url, shapes)).await?;
        tracing::debug!(url, count = records.len(), "fetched records");
        Ok(records)
    }

    async fn fetch_once<T: DeserializeOwned>(
        &self,
        url: &str,
        shapes: &[ResponseShape],
    ) -> Result<Vec<T>, FetchError> {
        let response = self
            .client
            .get(url)
            .header(FORCE_ERROR_MODE_HEADER, self.force_error_mode.as_str())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        let body = response.text().await?;
        decode_records::<T>(&body, shapes).map_err(|failure| FetchError::MalformedPayload {
            url: url.to_owned(),
            reason: failure.to_string(),
        })
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
