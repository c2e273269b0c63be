mod api;
mod middleware;
mod upstream;

use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};
use crate::upstream::UpstreamClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = bscan_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let Some(api_key) = config.barcode_lookup_api_key.as_deref() else {
        anyhow::bail!("BARCODE_LOOKUP_API_KEY is required; the proxy holds the key server-side");
    };
    let upstream = UpstreamClient::new(api_key, config.upstream_timeout_secs, &config.user_agent)?;
    let app = build_app(AppState { upstream });

    tracing::info!(addr = %config.bind_addr, "starting BarcodeLookup proxy");
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
