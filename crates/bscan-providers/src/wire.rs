//! Shared request plumbing for the provider adapters.

use reqwest::RequestBuilder;
use serde_json::Value;

use crate::error::ProviderError;

/// Sends a GET request and returns the status code with the raw body text.
///
/// Transport failures surface as [`ProviderError::Http`]; non-success
/// statuses are NOT an error here — callers that need the body of an error
/// response (the proxy envelope) read it themselves.
pub(crate) async fn fetch(request: RequestBuilder) -> Result<(u16, String), ProviderError> {
    let response = request.send().await?;
    let status = response.status().as_u16();
    let text = response.text().await?;
    Ok((status, text))
}

/// Parses a response body as JSON.
pub(crate) fn parse_json(text: &str, context: &str) -> Result<Value, ProviderError> {
    serde_json::from_str(text).map_err(|e| ProviderError::Deserialize {
        context: context.to_owned(),
        source: e,
    })
}

/// Sends a GET request, asserts a 2xx status, and parses the body as JSON.
///
/// # Errors
///
/// - [`ProviderError::Status`] for non-2xx responses, with a best-effort
///   message pulled from the error body.
/// - [`ProviderError::Http`] on transport failure.
/// - [`ProviderError::Deserialize`] if a success body is not valid JSON.
pub(crate) async fn get_json(request: RequestBuilder, context: &str) -> Result<Value, ProviderError> {
    let (status, text) = fetch(request).await?;
    if !(200..300).contains(&status) {
        return Err(ProviderError::Status {
            status,
            message: error_message(&text, status),
        });
    }
    parse_json(&text, context)
}

/// Best-effort human message from an upstream error body.
///
/// Providers disagree on the field name (`message` vs `error`); fall back
/// to the bare status when the body is not JSON at all.
pub(crate) fn error_message(text: &str, status: u16) -> String {
    serde_json::from_str::<Value>(text)
        .ok()
        .and_then(|body| {
            ["message", "error"]
                .iter()
                .find_map(|key| body.get(key).and_then(Value::as_str).map(ToOwned::to_owned))
        })
        .unwrap_or_else(|| format!("HTTP {status}"))
}
