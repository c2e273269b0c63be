use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Which upstream provider the lookup gateway binds for this deployment.
///
/// Exactly one provider is active at a time; there is no fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    BarcodeLookup,
    UpcItemDb,
    UpcDatabase,
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderKind::BarcodeLookup => write!(f, "barcodelookup"),
            ProviderKind::UpcItemDb => write!(f, "upcitemdb"),
            ProviderKind::UpcDatabase => write!(f, "upcdatabase"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub provider: ProviderKind,
    /// Request timeout for provider adapters.
    pub request_timeout_secs: u64,
    /// Fixed timeout for the proxy's upstream call.
    pub upstream_timeout_secs: u64,
    pub user_agent: String,
    pub barcode_lookup_api_key: Option<String>,
    /// Route BarcodeLookup traffic through the proxy service instead of
    /// calling the upstream directly (keeps the key out of this process).
    pub barcode_lookup_use_proxy: bool,
    pub proxy_base_url: String,
    pub upcitemdb_use_paid_plan: bool,
    pub upcitemdb_api_key: Option<String>,
    pub upcitemdb_key_type: String,
    pub upc_database_api_key: String,
    pub upc_database_use_relay: bool,
    /// CORS-bypass relay prefix; the target URL is appended percent-encoded.
    pub relay_url: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("provider", &self.provider)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("upstream_timeout_secs", &self.upstream_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field(
                "barcode_lookup_api_key",
                &self.barcode_lookup_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("barcode_lookup_use_proxy", &self.barcode_lookup_use_proxy)
            .field("proxy_base_url", &self.proxy_base_url)
            .field("upcitemdb_use_paid_plan", &self.upcitemdb_use_paid_plan)
            .field(
                "upcitemdb_api_key",
                &self.upcitemdb_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("upcitemdb_key_type", &self.upcitemdb_key_type)
            .field("upc_database_api_key", &"[redacted]")
            .field("upc_database_use_relay", &self.upc_database_use_relay)
            .field("relay_url", &self.relay_url)
            .finish()
    }
}
