//! Tally API Server
//!
//! Run with: cargo run --bin tally
//!
//! # Configuration
//!
//! Loads `config.toml` from the usual locations (see `config::Config`), then
//! applies `TALLY_*` environment overrides:
//! - `TALLY_TIMEZONE`: IANA timezone for uploaded timestamps (default: Asia/Singapore)
//! - `TALLY_WEEK_START`: monday or sunday (default: monday)
//! - `TALLY_API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `TALLY_API_PORT`: Port to listen on (default: 8086)
//! - `TALLY_MAX_UPLOAD_BYTES`: Upload size limit (default: 25 MB)
//! - `RUST_LOG`: Log filter (overrides the configured level)

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tally::api::{serve, ApiConfig, AppState};
use tally::config::Config;

#[derive(Parser)]
#[command(name = "tally")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Usage count analysis API server")]
struct Args {
    /// Path to a config file (overrides the default search locations)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind to (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides config)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(host) = args.host {
        config.api.host = host;
    }
    if let Some(port) = args.port {
        config.api.port = port;
    }

    init_tracing(&config);

    tracing::info!("Starting Tally API server v{}", env!("CARGO_PKG_VERSION"));

    let timezone = config.pipeline.timezone()?;
    tracing::info!(
        timezone = %timezone,
        week_start = ?config.pipeline.week_start,
        "pipeline configuration"
    );

    let api_config = ApiConfig {
        host: config.api.host.clone(),
        port: config.api.port,
        max_upload_bytes: config.api.max_upload_bytes,
    };

    let state = AppState::new(api_config.clone(), timezone, config.pipeline.week_start);

    serve(state, &api_config).await?;

    tracing::info!("Tally API server stopped");
    Ok(())
}

/// Initialize tracing per the `[logging]` config, with `RUST_LOG` taking
/// precedence when set.
fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("tally={},tower_http=info", config.logging.level).into());

    if config.logging.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}
