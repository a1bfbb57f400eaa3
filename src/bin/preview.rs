//! Bankdash Preview Server
//!
//! Run with: cargo run --bin bankdash-preview -- --fixture fixtures/chart-data.json
//!
//! Serves `static/` (host page + wasm bundle built from `bankdash-ui`) and
//! the fixture at `/api/chart-data`.
//!
//! # Configuration
//!
//! `--config <file>` loads a TOML file (see `--print-config`); otherwise
//! defaults are used. Environment variables override either:
//! - `BANKDASH_PREVIEW_HOST`, `BANKDASH_PREVIEW_PORT`
//! - `BANKDASH_STATIC_DIR`, `BANKDASH_FIXTURE`
//! - `BANKDASH_LOG_LEVEL`, `BANKDASH_LOG_FORMAT`
//! - `RUST_LOG`: full filter, takes precedence over the log level

use bankdash::config::{generate_default_config, Config, LoggingConfig};
use bankdash::preview::{serve, PreviewState};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "bankdash-preview", version, about = "Serve the dashboard with a fixture chart payload")]
struct Args {
    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Aggregate payload to serve at /api/chart-data
    #[arg(short, long)]
    fixture: Option<PathBuf>,

    /// Directory with the host page and wasm bundle
    #[arg(short, long)]
    static_dir: Option<PathBuf>,

    #[arg(long)]
    host: Option<String>,

    #[arg(short, long)]
    port: Option<u16>,

    /// Print a default config file and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.print_config {
        print!("{}", generate_default_config());
        return Ok(());
    }

    let mut config = match &args.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::from_env(),
    };

    if let Some(fixture) = args.fixture {
        config.preview.fixture_path = fixture.to_string_lossy().to_string();
    }
    if let Some(dir) = args.static_dir {
        config.preview.static_dir = dir.to_string_lossy().to_string();
    }
    if let Some(host) = args.host {
        config.preview.host = host;
    }
    if let Some(port) = args.port {
        config.preview.port = port;
    }

    init_logging(&config.logging);

    tracing::info!("Starting Bankdash preview v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Static directory: {}", config.preview.static_dir);
    tracing::info!("Fixture: {}", config.preview.fixture_path);

    let state = PreviewState::from_config(&config.preview);
    serve(state, &config.preview).await?;

    Ok(())
}

fn init_logging(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("bankdash={},tower_http=debug", logging.level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
