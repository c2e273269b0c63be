//! HTTP client for the BarcodeLookup.com upstream.
//!
//! The proxy is the only place the API key lives; it is attached to every
//! upstream request as a query parameter. The timeout is fixed by
//! configuration (10 s by default) — slow upstreams surface as
//! `SERVICE_UNAVAILABLE` to callers rather than hanging them.

use std::time::Duration;

use reqwest::{header, Client, Url};
use serde_json::Value;
use thiserror::Error;

const DEFAULT_ENDPOINT: &str = "https://api.barcodelookup.com/v3/products";

/// Errors from the upstream call, before translation into the proxy's
/// response envelope.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Network or TLS failure, including timeouts.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The upstream answered with a non-success status.
    #[error("upstream returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// The upstream body could not be parsed as JSON.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The configured endpoint is not a valid URL.
    #[error("invalid upstream URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Client holding the server-side API key for BarcodeLookup.com.
#[derive(Clone)]
pub struct UpstreamClient {
    client: Client,
    endpoint: Url,
    api_key: String,
}

impl std::fmt::Debug for UpstreamClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("api_key", &"[redacted]")
            .finish_non_exhaustive()
    }
}

impl UpstreamClient {
    /// Creates a client pointed at the production BarcodeLookup API.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, UpstreamError> {
        Self::with_endpoint(DEFAULT_ENDPOINT, api_key, timeout_secs, user_agent)
    }

    /// Creates a client with a custom endpoint (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::InvalidUrl`] if `endpoint` does not parse,
    /// or [`UpstreamError::Http`] if the client cannot be constructed.
    pub fn with_endpoint(
        endpoint: &str,
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .build()?;
        let endpoint = Url::parse(endpoint).map_err(|e| UpstreamError::InvalidUrl {
            url: endpoint.to_owned(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            client,
            endpoint,
            api_key: api_key.to_owned(),
        })
    }

    /// Fetches products for a barcode; returns the raw upstream body.
    ///
    /// # Errors
    ///
    /// - [`UpstreamError::Status`] on a non-2xx upstream response.
    /// - [`UpstreamError::Http`] on transport failure or timeout.
    /// - [`UpstreamError::Deserialize`] if the body is not valid JSON.
    pub async fn lookup(&self, barcode: &str) -> Result<Value, UpstreamError> {
        let url = self.build_url(&[("barcode", barcode), ("formatted", "y")]);
        self.request_json(url, "lookup").await
    }

    /// Searches products by keyword; returns the raw upstream body.
    ///
    /// # Errors
    ///
    /// Same as [`UpstreamClient::lookup`].
    pub async fn search(&self, query: &str, page: u32) -> Result<Value, UpstreamError> {
        let url = self.build_url(&[
            ("search", query),
            ("formatted", "y"),
            ("page", &page.to_string()),
        ]);
        self.request_json(url, "search").await
    }

    /// Builds the full request URL with percent-encoded query parameters
    /// and the API key appended last.
    fn build_url(&self, params: &[(&str, &str)]) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
            pairs.append_pair("key", &self.api_key);
        }
        url
    }

    async fn request_json(&self, url: Url, context: &str) -> Result<Value, UpstreamError> {
        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<Value>(&text)
                .ok()
                .and_then(|body| {
                    body.get("message")
                        .and_then(Value::as_str)
                        .map(ToOwned::to_owned)
                })
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("upstream error")
                        .to_owned()
                });
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&text).map_err(|e| UpstreamError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}
