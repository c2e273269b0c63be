mod render;
mod scan;

use clap::{Parser, Subcommand, ValueEnum};

use bscan_core::ProviderKind;
use bscan_providers::LookupGateway;

#[derive(Debug, Parser)]
#[command(name = "bscan")]
#[command(about = "Barcode product lookup toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Look up a single barcode through the configured provider.
    Lookup {
        barcode: String,
        /// Override the configured provider for this call.
        #[arg(long, value_enum)]
        provider: Option<ProviderArg>,
    },
    /// Search products by keyword (BarcodeLookup provider only).
    Search {
        query: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Drive a scan session from decoded texts read line-by-line on stdin.
    Scan,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ProviderArg {
    Barcodelookup,
    Upcitemdb,
    Upcdatabase,
}

impl From<ProviderArg> for ProviderKind {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::Barcodelookup => ProviderKind::BarcodeLookup,
            ProviderArg::Upcitemdb => ProviderKind::UpcItemDb,
            ProviderArg::Upcdatabase => ProviderKind::UpcDatabase,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let mut config = bscan_core::load_app_config()?;

    match cli.command {
        Commands::Lookup { barcode, provider } => {
            if let Some(arg) = provider {
                config.provider = arg.into();
            }
            let gateway = LookupGateway::from_config(&config)?;
            tracing::debug!(provider = %gateway.provider_kind(), "resolving barcode");
            let result = gateway.lookup(&barcode).await;
            render::render_lookup(&result);
        }
        Commands::Search { query, page } => {
            let gateway = LookupGateway::from_config(&config)?;
            match gateway.search(&query, page).await {
                Ok(products) => render::render_search(&query, &products),
                Err(failure) => render::render_failure(&failure),
            }
        }
        Commands::Scan => {
            let gateway = LookupGateway::from_config(&config)?;
            scan::run(gateway).await?;
        }
    }

    Ok(())
}
