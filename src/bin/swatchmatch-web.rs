//! swatchmatch web server binary
//!
//! Starts the REST API for palette derivation, role assignment and image
//! matching.
//!
//! # Usage
//!
//! ```bash
//! # Start with default settings (127.0.0.1:3002)
//! swatchmatch-web
//!
//! # Listen on all interfaces with debug logging
//! swatchmatch-web --host 0.0.0.0 --port 8080 --verbose
//! ```

use std::net::SocketAddr;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use swatchmatch::config::Config;
use swatchmatch::constants::DEFAULT_WEB_PORT;
use swatchmatch::web;

/// swatchmatch web server - REST API for palettes and image matching
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_WEB_PORT)]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Provider keys may live in a local .env file
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    // Initialize tracing
    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load or create configuration
    let config = Config::load().unwrap_or_else(|e| {
        warn!("Failed to load configuration, serving defaults without overwriting it: {e:#}");
        Config::default()
    });
    let config_path = Config::config_file_path()?;

    info!("Config file: {}", config_path.display());

    // Build socket address
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;

    // Start the server
    web::run_server(config, config_path, addr).await
}
