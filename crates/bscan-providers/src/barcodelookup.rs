//! Adapter for the BarcodeLookup.com product API.
//!
//! Two routing modes: *proxied* (the default) sends every request to the
//! proxy service, so no API key ever appears in this process; *direct*
//! calls the upstream with the key attached as a query parameter. The
//! proxy wraps everything in a `{"success": …}` envelope, so the proxied
//! path branches on that flag rather than on HTTP status alone.

use std::time::Duration;

use reqwest::{header, Client, Url};
use serde_json::Value;

use bscan_core::{
    AppConfig, Barcode, ErrorKind, LookupFailure, LookupResult, NormalizedProduct,
};

use crate::error::ProviderError;
use crate::normalize::normalize_barcodelookup;
use crate::wire;

const DEFAULT_ENDPOINT: &str = "https://api.barcodelookup.com/v3/products";

#[derive(Debug)]
enum Mode {
    Proxied { base_url: Url },
    Direct { endpoint: Url, api_key: String },
}

/// Client for BarcodeLookup.com, proxied or direct.
///
/// Use [`BarcodeLookupClient::from_config`] in production; the `*_with_*`
/// constructors exist to point at a mock server in tests.
pub struct BarcodeLookupClient {
    client: Client,
    mode: Mode,
}

impl BarcodeLookupClient {
    /// Builds the client in the mode the configuration selects.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::MissingApiKey`] when direct mode is selected
    /// without a key, [`ProviderError::InvalidUrl`] for an unparseable
    /// proxy base URL, or [`ProviderError::Http`] if the underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, ProviderError> {
        if config.barcode_lookup_use_proxy {
            Self::proxied(
                &config.proxy_base_url,
                config.request_timeout_secs,
                &config.user_agent,
            )
        } else {
            let api_key = config
                .barcode_lookup_api_key
                .as_deref()
                .ok_or(ProviderError::MissingApiKey {
                    provider: "BarcodeLookup",
                })?;
            Self::direct_with_endpoint(
                DEFAULT_ENDPOINT,
                api_key,
                config.request_timeout_secs,
                &config.user_agent,
            )
        }
    }

    /// Creates a proxied client targeting `base_url` (e.g.
    /// `http://localhost:3000/api`).
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::InvalidUrl`] or [`ProviderError::Http`].
    pub fn proxied(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            client: build_client(timeout_secs, user_agent)?,
            mode: Mode::Proxied {
                base_url: parse_base_url(base_url)?,
            },
        })
    }

    /// Creates a direct client with a custom endpoint (for testing with
    /// wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::InvalidUrl`] or [`ProviderError::Http`].
    pub fn direct_with_endpoint(
        endpoint: &str,
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            client: build_client(timeout_secs, user_agent)?,
            mode: Mode::Direct {
                endpoint: parse_url(endpoint)?,
                api_key: api_key.to_owned(),
            },
        })
    }

    /// Resolves a barcode into a [`LookupResult`]. Never raises: every
    /// failure path is classified into the result.
    pub async fn lookup(&self, barcode: &Barcode) -> LookupResult {
        let outcome = match &self.mode {
            Mode::Proxied { base_url } => self.lookup_proxied(base_url, barcode).await,
            Mode::Direct { endpoint, api_key } => {
                self.lookup_direct(endpoint, api_key, barcode).await
            }
        };
        match outcome {
            Ok(result) => result,
            Err(err) => {
                tracing::warn!(error = %err, barcode = %barcode, "BarcodeLookup lookup failed");
                LookupResult::Failed(err.classify())
            }
        }
    }

    /// Searches products by keyword.
    ///
    /// # Errors
    ///
    /// Returns a classified [`LookupFailure`] for every failure path.
    pub async fn search(
        &self,
        query: &str,
        page: u32,
    ) -> Result<Vec<NormalizedProduct>, LookupFailure> {
        match &self.mode {
            Mode::Proxied { base_url } => self.search_proxied(base_url, query, page).await,
            Mode::Direct { endpoint, api_key } => {
                self.search_direct(endpoint, api_key, query, page).await
            }
        }
        .map_err(|failure| {
            tracing::warn!(error = %failure, query, "BarcodeLookup search failed");
            failure
        })
    }

    async fn lookup_proxied(
        &self,
        base_url: &Url,
        barcode: &Barcode,
    ) -> Result<LookupResult, ProviderError> {
        let url = join_path(base_url, &["lookup", barcode.as_str()])?;
        let (status, text) = wire::fetch(self.get(url)).await?;
        let body = wire::parse_json(&text, "proxy lookup")?;

        if !envelope_success(&body) {
            if envelope_code(&body) == "NOT_FOUND" {
                return Ok(LookupResult::not_found(envelope_error(&body)));
            }
            return Ok(LookupResult::Failed(envelope_failure(status, &body)));
        }

        let raw = body.get("product").cloned().unwrap_or(Value::Null);
        Ok(LookupResult::Found {
            product: normalize_barcodelookup(&raw),
            raw,
        })
    }

    async fn lookup_direct(
        &self,
        endpoint: &Url,
        api_key: &str,
        barcode: &Barcode,
    ) -> Result<LookupResult, ProviderError> {
        let url = with_query(
            endpoint,
            &[
                ("barcode", barcode.as_str()),
                ("formatted", "y"),
                ("key", api_key),
            ],
        );
        let body = wire::get_json(self.get(url), "BarcodeLookup lookup").await?;

        match first_product(&body) {
            None => Ok(LookupResult::not_found("No product found for this barcode")),
            Some(raw) => Ok(LookupResult::Found {
                product: normalize_barcodelookup(&raw),
                raw,
            }),
        }
    }

    async fn search_proxied(
        &self,
        base_url: &Url,
        query: &str,
        page: u32,
    ) -> Result<Vec<NormalizedProduct>, LookupFailure> {
        let fetched = async {
            let mut url = join_path(base_url, &["search"])?;
            url.query_pairs_mut()
                .append_pair("q", query)
                .append_pair("page", &page.to_string());
            let (status, text) = wire::fetch(self.get(url)).await?;
            let body = wire::parse_json(&text, "proxy search")?;
            Ok::<_, ProviderError>((status, body))
        }
        .await
        .map_err(|err| err.classify())?;

        let (status, body) = fetched;
        if !envelope_success(&body) {
            return Err(envelope_failure(status, &body));
        }
        Ok(normalize_product_list(&body))
    }

    async fn search_direct(
        &self,
        endpoint: &Url,
        api_key: &str,
        query: &str,
        page: u32,
    ) -> Result<Vec<NormalizedProduct>, LookupFailure> {
        let url = with_query(
            endpoint,
            &[
                ("search", query),
                ("formatted", "y"),
                ("page", &page.to_string()),
                ("key", api_key),
            ],
        );
        let body = wire::get_json(self.get(url), "BarcodeLookup search")
            .await
            .map_err(|err| err.classify())?;
        Ok(normalize_product_list(&body))
    }

    fn get(&self, url: Url) -> reqwest::RequestBuilder {
        self.client
            .get(url)
            .header(header::ACCEPT, "application/json")
    }
}

fn build_client(timeout_secs: u64, user_agent: &str) -> Result<Client, ProviderError> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(user_agent)
        .build()?)
}

fn parse_url(raw: &str) -> Result<Url, ProviderError> {
    Url::parse(raw).map_err(|e| ProviderError::InvalidUrl {
        url: raw.to_owned(),
        reason: e.to_string(),
    })
}

/// Normalise: ensure the base URL ends with exactly one slash so joined
/// paths extend it rather than replacing the last segment.
fn parse_base_url(raw: &str) -> Result<Url, ProviderError> {
    parse_url(&format!("{}/", raw.trim_end_matches('/')))
}

fn join_path(base: &Url, segments: &[&str]) -> Result<Url, ProviderError> {
    let mut url = base.clone();
    {
        let mut parts = url
            .path_segments_mut()
            .map_err(|()| ProviderError::InvalidUrl {
                url: base.to_string(),
                reason: "cannot be a base URL".to_owned(),
            })?;
        parts.pop_if_empty();
        for segment in segments {
            parts.push(segment);
        }
    }
    Ok(url)
}

fn with_query(endpoint: &Url, params: &[(&str, &str)]) -> Url {
    let mut url = endpoint.clone();
    {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in params {
            pairs.append_pair(key, value);
        }
    }
    url
}

fn first_product(body: &Value) -> Option<Value> {
    body.get("products")
        .and_then(Value::as_array)
        .and_then(|products| products.first())
        .cloned()
}

fn normalize_product_list(body: &Value) -> Vec<NormalizedProduct> {
    body.get("products")
        .and_then(Value::as_array)
        .map(|products| products.iter().map(normalize_barcodelookup).collect())
        .unwrap_or_default()
}

fn envelope_success(body: &Value) -> bool {
    body.get("success").and_then(Value::as_bool) == Some(true)
}

fn envelope_code(body: &Value) -> &str {
    body.get("code").and_then(Value::as_str).unwrap_or_default()
}

fn envelope_error(body: &Value) -> String {
    body.get("error")
        .and_then(Value::as_str)
        .unwrap_or("lookup failed")
        .to_owned()
}

/// Maps a proxy error envelope onto the failure taxonomy, keeping the
/// proxy's own classification where it is more specific than `ApiError`.
fn envelope_failure(status: u16, body: &Value) -> LookupFailure {
    let kind = match envelope_code(body) {
        "SERVICE_UNAVAILABLE" => ErrorKind::ServiceUnavailable,
        "INVALID_BARCODE" | "INVALID_QUERY" => ErrorKind::InvalidInput,
        _ => ErrorKind::ApiError,
    };
    LookupFailure::with_status(kind, envelope_error(body), status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_base_url_appends_single_trailing_slash() {
        let base = parse_base_url("http://localhost:3000/api").expect("valid");
        assert_eq!(base.as_str(), "http://localhost:3000/api/");
        let base = parse_base_url("http://localhost:3000/api///").expect("valid");
        assert_eq!(base.as_str(), "http://localhost:3000/api/");
    }

    #[test]
    fn join_path_extends_the_base_path() {
        let base = parse_base_url("http://localhost:3000/api").expect("valid");
        let url = join_path(&base, &["lookup", "049000050103"]).expect("joinable");
        assert_eq!(url.as_str(), "http://localhost:3000/api/lookup/049000050103");
    }

    #[test]
    fn with_query_percent_encodes_values() {
        let endpoint = parse_url(DEFAULT_ENDPOINT).expect("valid");
        let url = with_query(&endpoint, &[("search", "coke & pepsi"), ("key", "k")]);
        assert!(
            url.as_str().contains("coke+%26+pepsi") || url.as_str().contains("coke%20%26%20pepsi"),
            "query param should be percent-encoded: {url}"
        );
    }

    #[test]
    fn envelope_failure_keeps_service_unavailable_kind() {
        let body = json!({"success": false, "code": "SERVICE_UNAVAILABLE", "error": "down"});
        let failure = envelope_failure(503, &body);
        assert_eq!(failure.kind, ErrorKind::ServiceUnavailable);
        assert_eq!(failure.http_status, Some(503));
    }

    #[test]
    fn envelope_success_requires_explicit_true() {
        assert!(!envelope_success(&json!({})));
        assert!(!envelope_success(&json!({"success": "true"})));
        assert!(envelope_success(&json!({"success": true})));
    }
}
