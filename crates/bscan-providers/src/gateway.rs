//! The lookup gateway: one configured provider behind one contract.
//!
//! Exactly one adapter is active per deployment — there is no fallback
//! chain. The gateway owns input validation so empty input never costs a
//! network round trip.

use std::future::Future;

use bscan_core::{
    AppConfig, Barcode, BarcodeError, ErrorKind, LookupFailure, LookupResult, NormalizedProduct,
    ProductLookup, ProviderKind,
};

use crate::barcodelookup::BarcodeLookupClient;
use crate::error::ProviderError;
use crate::upcdatabase::UpcDatabaseClient;
use crate::upcitemdb::UpcItemDbClient;

/// One provider adapter, selected by configuration.
pub enum Provider {
    BarcodeLookup(BarcodeLookupClient),
    UpcItemDb(UpcItemDbClient),
    UpcDatabase(UpcDatabaseClient),
}

impl Provider {
    /// Builds the adapter the configuration selects.
    ///
    /// # Errors
    ///
    /// Propagates the adapter's construction error (bad URL, missing key,
    /// client build failure).
    pub fn from_config(config: &AppConfig) -> Result<Self, ProviderError> {
        match config.provider {
            ProviderKind::BarcodeLookup => {
                BarcodeLookupClient::from_config(config).map(Provider::BarcodeLookup)
            }
            ProviderKind::UpcItemDb => {
                UpcItemDbClient::from_config(config).map(Provider::UpcItemDb)
            }
            ProviderKind::UpcDatabase => {
                UpcDatabaseClient::from_config(config).map(Provider::UpcDatabase)
            }
        }
    }

    #[must_use]
    pub fn kind(&self) -> ProviderKind {
        match self {
            Provider::BarcodeLookup(_) => ProviderKind::BarcodeLookup,
            Provider::UpcItemDb(_) => ProviderKind::UpcItemDb,
            Provider::UpcDatabase(_) => ProviderKind::UpcDatabase,
        }
    }

    /// Resolves a validated barcode through the active adapter.
    pub async fn lookup(&self, barcode: &Barcode) -> LookupResult {
        match self {
            Provider::BarcodeLookup(client) => client.lookup(barcode).await,
            Provider::UpcItemDb(client) => client.lookup(barcode).await,
            Provider::UpcDatabase(client) => client.lookup(barcode).await,
        }
    }
}

/// Normalized interface over the heterogeneous upstream providers.
pub struct LookupGateway {
    provider: Provider,
}

impl LookupGateway {
    #[must_use]
    pub fn new(provider: Provider) -> Self {
        Self { provider }
    }

    /// Builds the gateway with the configured provider.
    ///
    /// # Errors
    ///
    /// Propagates the adapter's construction error.
    pub fn from_config(config: &AppConfig) -> Result<Self, ProviderError> {
        Provider::from_config(config).map(Self::new)
    }

    #[must_use]
    pub fn provider_kind(&self) -> ProviderKind {
        self.provider.kind()
    }

    /// Resolves raw decoded text into a [`LookupResult`].
    ///
    /// Empty input (after trimming) fails synchronously with
    /// `InvalidInput` — no request is issued.
    pub async fn lookup(&self, raw: &str) -> LookupResult {
        let barcode = match Barcode::parse(raw) {
            Ok(code) => code,
            Err(BarcodeError::Empty) => {
                return LookupResult::Failed(LookupFailure::invalid_input(
                    "barcode cannot be empty",
                ))
            }
        };
        self.provider.lookup(&barcode).await
    }

    /// Searches products by keyword through the active provider.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` for a blank query, without any network call.
    /// - `ApiError` when the active provider has no search surface.
    /// - Otherwise whatever classified failure the adapter reports.
    pub async fn search(
        &self,
        query: &str,
        page: u32,
    ) -> Result<Vec<NormalizedProduct>, LookupFailure> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(LookupFailure::invalid_input("query cannot be empty"));
        }
        match &self.provider {
            Provider::BarcodeLookup(client) => client.search(trimmed, page).await,
            other => Err(LookupFailure::new(
                ErrorKind::ApiError,
                format!("search is not supported by provider {}", other.kind()),
            )),
        }
    }
}

impl ProductLookup for LookupGateway {
    fn lookup(&self, barcode: &str) -> impl Future<Output = LookupResult> + Send {
        LookupGateway::lookup(self, barcode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway() -> LookupGateway {
        let client = BarcodeLookupClient::proxied("http://localhost:9", 1, "test-agent")
            .expect("client construction should not fail");
        LookupGateway::new(Provider::BarcodeLookup(client))
    }

    #[tokio::test]
    async fn lookup_rejects_empty_input_synchronously() {
        let result = gateway().lookup("").await;
        let LookupResult::Failed(failure) = result else {
            panic!("expected Failed, got {result:?}");
        };
        assert_eq!(failure.kind, ErrorKind::InvalidInput);
    }

    #[tokio::test]
    async fn lookup_rejects_whitespace_input_synchronously() {
        let result = gateway().lookup("   ").await;
        assert!(matches!(
            result,
            LookupResult::Failed(LookupFailure {
                kind: ErrorKind::InvalidInput,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn search_rejects_blank_query_synchronously() {
        let failure = gateway()
            .search("  ", 1)
            .await
            .expect_err("blank query must fail");
        assert_eq!(failure.kind, ErrorKind::InvalidInput);
    }

    #[tokio::test]
    async fn search_unsupported_provider_fails_without_io() {
        let client = UpcItemDbClient::trial_with_endpoint(
            "https://api.upcitemdb.com/prod/trial/lookup",
            1,
            "test-agent",
        )
        .expect("client");
        let gateway = LookupGateway::new(Provider::UpcItemDb(client));
        let failure = gateway
            .search("coke", 1)
            .await
            .expect_err("provider has no search surface");
        assert_eq!(failure.kind, ErrorKind::ApiError);
        assert!(failure.message.contains("upcitemdb"));
    }
}
