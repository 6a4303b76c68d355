//! Startup orchestration.
//!
//! # Responsibilities
//! - Start the metrics exporter when enabled
//! - Bind the listener
//! - Start the config watcher when a config file is in use
//! - Serve until shutdown

use std::net::SocketAddr;
use std::path::PathBuf;

use tokio::net::TcpListener;
use tokio::sync::mpsc;

use crate::config::{ConfigWatcher, NimbusConfig};
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::observability::metrics;

/// Fatal startup or serve failure.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to build upstream client: {0}")]
    Client(#[from] reqwest::Error),
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Run the service with a validated configuration until a termination signal.
///
/// `config_path` enables hot reload of that file.
pub async fn start(config: NimbusConfig, config_path: Option<PathBuf>) -> Result<(), StartupError> {
    if config.upstream.api_key.is_none() {
        tracing::warn!("No upstream API key configured; upstream calls will be rejected");
    }

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let server = HttpServer::new(config.clone())?;

    let listener = TcpListener::bind(&config.listener.bind_address)
        .await
        .map_err(|source| StartupError::Bind {
            address: config.listener.bind_address.clone(),
            source,
        })?;

    // The watcher handle must outlive the server for reloads to keep flowing.
    let (_watcher, config_updates) = match config_path {
        Some(path) => {
            let (watcher, updates) = ConfigWatcher::new(&path);
            match watcher.run() {
                Ok(handle) => (Some(handle), updates),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Config hot reload disabled");
                    (None, updates)
                }
            }
        }
        None => (None, mpsc::unbounded_channel().1),
    };

    let shutdown = Shutdown::new();
    signals::spawn_signal_handler(shutdown.clone());

    server
        .run(listener, config_updates, shutdown.subscribe())
        .await
        .map_err(StartupError::Serve)
}
