//! Nimbus weather gateway.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ http (request id, trace, cors, timeout, metrics)
//!                        │
//!                        ▼
//!                     routing (parameter validation)
//!                        │
//!                        ▼
//!                     gateway ──── GET ────▶ geocoding / forecast API
//!                        │        ◀────────
//!                        ▼
//!     Client Response  reshape (truncate, project)
//!     ◀──────────────
//! ```

use std::path::{Path, PathBuf};

use clap::Parser;

use nimbus::config::{self, loader::DEFAULT_CONFIG_PATH};
use nimbus::lifecycle;
use nimbus::observability::logging;

#[derive(Parser)]
#[command(name = "nimbus", version, about = "Weather and geocoding gateway")]
struct Cli {
    /// Path to the TOML configuration file (default: ./nimbus.toml when present).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = config::load_startup_config(cli.config.as_deref())?;
    logging::init(&config.observability);

    tracing::info!("nimbus v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        geo_url = %config.upstream.geo_url,
        forecast_url = %config.upstream.forecast_url,
        units = config.upstream.units.as_str(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let watched = cli.config.or_else(|| {
        let default_path = Path::new(DEFAULT_CONFIG_PATH);
        default_path.exists().then(|| default_path.to_path_buf())
    });

    lifecycle::start(config, watched).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
