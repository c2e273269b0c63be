//! The normalized lookup contract every provider adapter resolves to.
//!
//! Adapters never raise uncaught faults: every path — success, zero
//! results, upstream rejection, transport failure — settles into a
//! [`LookupResult`].

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::product::NormalizedProduct;

/// Classification for lookup failures, mirrored by the proxy's wire codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Empty or malformed input, detected locally; never reaches the network.
    InvalidInput,
    /// The upstream provider returned a non-success status.
    ApiError,
    /// The upstream provider is unreachable or timed out.
    ServiceUnavailable,
    /// Local transport failure (DNS, connection, malformed body).
    NetworkError,
    /// Unexpected fault inside this system.
    InternalError,
}

impl ErrorKind {
    /// Stable wire code for this kind.
    ///
    /// `InvalidInput` defaults to the barcode-flavored code; query
    /// validation sites override it with `INVALID_QUERY`.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "INVALID_BARCODE",
            ErrorKind::ApiError => "API_ERROR",
            ErrorKind::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            ErrorKind::NetworkError => "NETWORK_ERROR",
            ErrorKind::InternalError => "INTERNAL_ERROR",
        }
    }
}

/// A classified lookup failure.
///
/// `http_status` carries the upstream status for `ApiError`; it is `None`
/// for failures that never produced a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupFailure {
    pub kind: ErrorKind,
    pub message: String,
    pub http_status: Option<u16>,
}

impl LookupFailure {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            http_status: None,
        }
    }

    pub fn with_status(kind: ErrorKind, message: impl Into<String>, status: u16) -> Self {
        Self {
            kind,
            message: message.into(),
            http_status: Some(status),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInput, message)
    }
}

impl std::fmt::Display for LookupFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.http_status {
            Some(status) => write!(f, "{} (HTTP {status}): {}", self.kind.code(), self.message),
            None => write!(f, "{}: {}", self.kind.code(), self.message),
        }
    }
}

impl std::error::Error for LookupFailure {}

/// Outcome of resolving one barcode against one provider.
#[derive(Debug, Clone)]
pub enum LookupResult {
    /// A product matched; `raw` keeps the untouched provider payload.
    Found {
        product: NormalizedProduct,
        raw: serde_json::Value,
    },
    /// The request was well-formed but matched nothing.
    NotFound { reason: String },
    /// The lookup could not be completed.
    Failed(LookupFailure),
}

impl LookupResult {
    pub fn not_found(reason: impl Into<String>) -> Self {
        LookupResult::NotFound {
            reason: reason.into(),
        }
    }

    pub fn failed(kind: ErrorKind, message: impl Into<String>) -> Self {
        LookupResult::Failed(LookupFailure::new(kind, message))
    }

    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, LookupResult::Found { .. })
    }
}

impl From<LookupFailure> for LookupResult {
    fn from(failure: LookupFailure) -> Self {
        LookupResult::Failed(failure)
    }
}

/// The seam between the scan session controller and whichever gateway or
/// adapter resolves barcodes for it.
///
/// Takes raw decoded text: implementations own validation and must settle
/// every input into a [`LookupResult`].
pub trait ProductLookup {
    fn lookup(&self, barcode: &str) -> impl Future<Output = LookupResult> + Send;
}
