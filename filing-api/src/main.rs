use anyhow::{Context, Result};
use clap::Parser;
use filing_api::config::AppConfig;
use filing_api::routes::{AppState, router};
use filing_api::telemetry;
use filing_core::BracketRegistry;
use tracing::info;

/// HTTP service exposing the tax calculation engine.
#[derive(Parser, Debug)]
#[command(name = "filing-api", version, about)]
struct Cli {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,

    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load().context("failed to load configuration")?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry).context("failed to initialize telemetry")?;

    let state = AppState::new(BracketRegistry::builtin());
    let app = router(state);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(?config.environment, %addr, "tax calculation service ready");

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
