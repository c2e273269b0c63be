//! Adapter for the UPCItemDB lookup API.
//!
//! The free trial endpoint needs no credentials; paid plans use a
//! different path and authenticate with `user_key`/`key_type` headers.
//! Which endpoint is active is static configuration, not a runtime
//! fallback.

use std::time::Duration;

use reqwest::{header, Client, Url};
use serde_json::Value;

use bscan_core::{AppConfig, Barcode, LookupResult};

use crate::error::ProviderError;
use crate::normalize::normalize_upcitemdb;
use crate::wire;

const TRIAL_ENDPOINT: &str = "https://api.upcitemdb.com/prod/trial/lookup";
const PAID_ENDPOINT: &str = "https://api.upcitemdb.com/prod/v1/lookup";

#[derive(Debug, Clone)]
struct PaidPlan {
    api_key: String,
    key_type: String,
}

/// Client for UPCItemDB, trial or paid.
pub struct UpcItemDbClient {
    client: Client,
    endpoint: Url,
    plan: Option<PaidPlan>,
}

impl UpcItemDbClient {
    /// Builds the client for the plan the configuration selects.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::MissingApiKey`] when the paid plan is
    /// selected without a key, or [`ProviderError::Http`] if the underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, ProviderError> {
        let plan = if config.upcitemdb_use_paid_plan {
            let api_key =
                config
                    .upcitemdb_api_key
                    .clone()
                    .ok_or(ProviderError::MissingApiKey {
                        provider: "UPCItemDB",
                    })?;
            Some(PaidPlan {
                api_key,
                key_type: config.upcitemdb_key_type.clone(),
            })
        } else {
            None
        };
        let endpoint = if plan.is_some() {
            PAID_ENDPOINT
        } else {
            TRIAL_ENDPOINT
        };
        Self::with_endpoint(endpoint, plan, config.request_timeout_secs, &config.user_agent)
    }

    /// Creates a client with a custom endpoint (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::InvalidUrl`] or [`ProviderError::Http`].
    pub fn trial_with_endpoint(
        endpoint: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ProviderError> {
        Self::with_endpoint(endpoint, None, timeout_secs, user_agent)
    }

    fn with_endpoint(
        endpoint: &str,
        plan: Option<PaidPlan>,
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
            plan,
        })
    }

    /// Resolves a barcode into a [`LookupResult`]. Never raises: every
    /// failure path is classified into the result.
    pub async fn lookup(&self, barcode: &Barcode) -> LookupResult {
        match self.lookup_inner(barcode).await {
            Ok(result) => result,
            Err(err) => {
                tracing::warn!(error = %err, barcode = %barcode, "UPCItemDB lookup failed");
                LookupResult::Failed(err.classify())
            }
        }
    }

    async fn lookup_inner(&self, barcode: &Barcode) -> Result<LookupResult, ProviderError> {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("upc", barcode.as_str());

        let mut request = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json");
        if let Some(plan) = &self.plan {
            request = request
                .header("user_key", &plan.api_key)
                .header("key_type", &plan.key_type);
        }

        let body = wire::get_json(request, "UPCItemDB lookup").await?;

        let first = body
            .get("items")
            .and_then(Value::as_array)
            .and_then(|items| items.first())
            .cloned();
        match first {
            // The first item is the best match.
            Some(raw) => Ok(LookupResult::Found {
                product: normalize_upcitemdb(&raw),
                raw,
            }),
            None => Ok(LookupResult::not_found("No product found for this barcode")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trial_client_has_no_plan() {
        let client =
            UpcItemDbClient::trial_with_endpoint(TRIAL_ENDPOINT, 30, "test-agent").expect("client");
        assert!(client.plan.is_none());
        assert_eq!(client.endpoint.as_str(), TRIAL_ENDPOINT);
    }

    #[test]
    fn with_endpoint_rejects_invalid_urls() {
        let result = UpcItemDbClient::trial_with_endpoint("not a url", 30, "test-agent");
        assert!(matches!(result, Err(ProviderError::InvalidUrl { .. })));
    }
}
