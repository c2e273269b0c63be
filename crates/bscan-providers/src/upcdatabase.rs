//! Adapter for the UPCDatabase.org product API.
//!
//! This provider is consumed from browsers without CORS support, which
//! shapes two constraints the adapter preserves: the API key travels as a
//! query parameter (an auth header would trigger a cross-origin
//! preflight), and requests may be routed through a generic relay that
//! takes the percent-encoded target URL as its own query parameter.
//! Request headers are limited to `Accept: application/json`.

use std::time::Duration;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::{header, Client, Url};
use serde_json::Value;

use bscan_core::{AppConfig, Barcode, LookupResult};

use crate::error::ProviderError;
use crate::normalize::normalize_upcdatabase;
use crate::wire;

const DEFAULT_ENDPOINT: &str = "https://api.upcdatabase.org/product";

/// Client for UPCDatabase.org.
pub struct UpcDatabaseClient {
    client: Client,
    endpoint: Url,
    api_key: String,
    /// Relay prefix ending in `url=`; `None` calls the endpoint directly.
    relay: Option<String>,
}

impl UpcDatabaseClient {
    /// Builds the client from configuration. The bundled default key is a
    /// configuration default, not a secret; deployments override it with
    /// `UPC_DATABASE_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, ProviderError> {
        let relay = config
            .upc_database_use_relay
            .then(|| config.relay_url.clone());
        Self::with_endpoint(
            DEFAULT_ENDPOINT,
            &config.upc_database_api_key,
            relay,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// Creates a client with a custom endpoint and optional relay (for
    /// testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::InvalidUrl`] or [`ProviderError::Http`].
    pub fn with_endpoint(
        endpoint: &str,
        api_key: &str,
        relay: Option<String>,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        let endpoint = Url::parse(endpoint).map_err(|e| ProviderError::InvalidUrl {
            url: endpoint.to_owned(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            client,
            endpoint,
            api_key: api_key.to_owned(),
            relay,
        })
    }

    /// Resolves a barcode into a [`LookupResult`]. Never raises: every
    /// failure path is classified into the result.
    pub async fn lookup(&self, barcode: &Barcode) -> LookupResult {
        match self.lookup_inner(barcode).await {
            Ok(result) => result,
            Err(err) => {
                tracing::warn!(error = %err, barcode = %barcode, "UPCDatabase lookup failed");
                LookupResult::Failed(err.classify())
            }
        }
    }

    async fn lookup_inner(&self, barcode: &Barcode) -> Result<LookupResult, ProviderError> {
        let url = self.request_url(barcode)?;
        let request = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json");
        let body = wire::get_json(request, "UPCDatabase lookup").await?;

        // The API reports misses inside a 200 body: an `error` field, or an
        // explicit `valid` marker (boolean false, or the string "false").
        if let Some(message) = body.get("error").and_then(Value::as_str) {
            return Ok(LookupResult::not_found(message.to_owned()));
        }
        let valid = body.get("valid");
        if valid == Some(&Value::Bool(false))
            || valid.and_then(Value::as_str) == Some("false")
        {
            return Ok(LookupResult::not_found(
                "Invalid barcode or product not found",
            ));
        }

        Ok(LookupResult::Found {
            product: normalize_upcdatabase(&body),
            raw: body,
        })
    }

    /// Builds the target URL for a barcode: the code zero-padded to 13
    /// digits as a path segment, the key as a query parameter, the whole
    /// thing wrapped in the relay when one is configured.
    fn request_url(&self, barcode: &Barcode) -> Result<Url, ProviderError> {
        let mut target = self.endpoint.clone();
        target
            .path_segments_mut()
            .map_err(|()| ProviderError::InvalidUrl {
                url: self.endpoint.to_string(),
                reason: "cannot be a base URL".to_owned(),
            })?
            .pop_if_empty()
            .push(&barcode.padded13());
        if !self.api_key.is_empty() {
            target.query_pairs_mut().append_pair("apikey", &self.api_key);
        }

        match &self.relay {
            None => Ok(target),
            Some(relay) => {
                let wrapped = format!(
                    "{relay}{}",
                    utf8_percent_encode(target.as_str(), NON_ALPHANUMERIC)
                );
                Url::parse(&wrapped).map_err(|e| ProviderError::InvalidUrl {
                    url: wrapped,
                    reason: e.to_string(),
                })
            }
        }
    }
}
