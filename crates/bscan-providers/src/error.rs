use thiserror::Error;

use bscan_core::{ErrorKind, LookupFailure};

/// Errors raised inside a provider adapter before classification.
///
/// These never escape an adapter's public surface — [`ProviderError::classify`]
/// folds them into the normalized [`LookupFailure`] shape.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The upstream returned a non-success HTTP status.
    #[error("upstream returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body could not be parsed as JSON.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A configured endpoint or base URL is not a valid URL.
    #[error("invalid URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The deployment selected a mode that needs a key, and none is set.
    #[error("missing API key for {provider}")]
    MissingApiKey { provider: &'static str },
}

impl ProviderError {
    /// Folds this error into the normalized failure taxonomy.
    ///
    /// Non-success statuses become `ApiError` carrying the upstream status;
    /// everything that never produced a usable response — transport faults,
    /// malformed bodies — is a `NetworkError`; a bad configured URL is an
    /// `InternalError` (ours, not the upstream's).
    #[must_use]
    pub fn classify(&self) -> LookupFailure {
        match self {
            ProviderError::Status { status, message } => {
                LookupFailure::with_status(ErrorKind::ApiError, message.clone(), *status)
            }
            ProviderError::Http(e) => LookupFailure::new(ErrorKind::NetworkError, e.to_string()),
            ProviderError::Deserialize { context, source } => LookupFailure::new(
                ErrorKind::NetworkError,
                format!("malformed response from {context}: {source}"),
            ),
            ProviderError::InvalidUrl { url, reason } => LookupFailure::new(
                ErrorKind::InternalError,
                format!("invalid URL \"{url}\": {reason}"),
            ),
            ProviderError::MissingApiKey { provider } => LookupFailure::new(
                ErrorKind::InternalError,
                format!("missing API key for {provider}"),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classifies_as_api_error_with_status() {
        let failure = ProviderError::Status {
            status: 429,
            message: "too many requests".to_owned(),
        }
        .classify();
        assert_eq!(failure.kind, ErrorKind::ApiError);
        assert_eq!(failure.http_status, Some(429));
    }

    #[test]
    fn deserialize_classifies_as_network_error() {
        let source = serde_json::from_str::<()>("not json").unwrap_err();
        let failure = ProviderError::Deserialize {
            context: "lookup".to_owned(),
            source,
        }
        .classify();
        assert_eq!(failure.kind, ErrorKind::NetworkError);
        assert!(failure.http_status.is_none());
    }

    #[test]
    fn invalid_url_classifies_as_internal_error() {
        let failure = ProviderError::InvalidUrl {
            url: "::".to_owned(),
            reason: "empty host".to_owned(),
        }
        .classify();
        assert_eq!(failure.kind, ErrorKind::InternalError);
    }
}
