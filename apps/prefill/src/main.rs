mod cli;
mod config;
mod eligibility;
mod errors;
mod form;
mod http_client;
mod member_api;
mod models;
mod postcode;

use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting prefill v{} (api: {})", env!("CARGO_PKG_VERSION"), config.api_base_url);

    if let Err(e) = cli::run(config).await {
        error!("{e}");
        std::process::exit(e.exit_code());
    }

    Ok(())
}
