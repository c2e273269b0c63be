use thiserror::Error;

use crate::app_config::{AppConfig, Environment, ProviderKind};

/// UPCDatabase key shipped as a configuration default (limited access tier);
/// override with `UPC_DATABASE_API_KEY`.
pub const DEFAULT_UPC_DATABASE_KEY: &str = "C0D1F5CEBE1CC47A17C986642FEF7B53";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        match or_default(var, default).as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            other => Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("expected true/false, got \"{other}\""),
            }),
        }
    };

    let env = parse_environment(&or_default("BSCAN_ENV", "development"));
    let bind_addr = parse_addr("BSCAN_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("BSCAN_LOG_LEVEL", "info");
    let provider = parse_provider(&or_default("BSCAN_PROVIDER", "barcodelookup"))?;

    let request_timeout_secs = parse_u64("BSCAN_REQUEST_TIMEOUT_SECS", "30")?;
    let upstream_timeout_secs = parse_u64("BSCAN_UPSTREAM_TIMEOUT_SECS", "10")?;
    let user_agent = or_default("BSCAN_USER_AGENT", "bscan/0.1 (barcode-lookup)");

    let barcode_lookup_api_key = lookup("BARCODE_LOOKUP_API_KEY").ok();
    let barcode_lookup_use_proxy = parse_bool("BSCAN_USE_PROXY", "true")?;
    let proxy_base_url = or_default("BSCAN_PROXY_URL", "http://localhost:3000/api");

    let upcitemdb_use_paid_plan = parse_bool("UPCITEMDB_USE_PAID_PLAN", "false")?;
    let upcitemdb_api_key = lookup("UPCITEMDB_API_KEY").ok();
    let upcitemdb_key_type = or_default("UPCITEMDB_KEY_TYPE", "3scale");

    let upc_database_api_key = or_default("UPC_DATABASE_API_KEY", DEFAULT_UPC_DATABASE_KEY);
    let upc_database_use_relay = parse_bool("BSCAN_UPC_DATABASE_USE_RELAY", "true")?;
    let relay_url = or_default("BSCAN_RELAY_URL", "https://api.allorigins.win/raw?url=");

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        provider,
        request_timeout_secs,
        upstream_timeout_secs,
        user_agent,
        barcode_lookup_api_key,
        barcode_lookup_use_proxy,
        proxy_base_url,
        upcitemdb_use_paid_plan,
        upcitemdb_api_key,
        upcitemdb_key_type,
        upc_database_api_key,
        upc_database_use_relay,
        relay_url,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

/// Parse a provider name. Unlike the environment, an unrecognized provider
/// is a hard error — silently falling back would route lookups elsewhere.
fn parse_provider(s: &str) -> Result<ProviderKind, ConfigError> {
    match s {
        "barcodelookup" => Ok(ProviderKind::BarcodeLookup),
        "upcitemdb" => Ok(ProviderKind::UpcItemDb),
        "upcdatabase" => Ok(ProviderKind::UpcDatabase),
        other => Err(ConfigError::InvalidEnvVar {
            var: "BSCAN_PROVIDER".to_string(),
            reason: format!("unknown provider \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
