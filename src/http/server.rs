//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, CORS, metrics)
//! - Hold the inbound request deadline applied around upstream calls
//! - Bind server to listener
//! - Swap the upstream gateway when a new configuration arrives
//! - Drain in-flight requests on shutdown

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use axum::{middleware, Router};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::NimbusConfig;
use crate::gateway::{Gateway, GatewayError, Operation};
use crate::http::middleware::track_metrics;
use crate::http::request::{request_span, MakeRequestUuidV4};
use crate::observability::metrics;
use crate::routing;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    gateway: Arc<ArcSwap<Gateway>>,
    request_timeout: Duration,
}

impl AppState {
    pub fn new(gateway: Gateway, request_timeout: Duration) -> Self {
        Self {
            gateway: Arc::new(ArcSwap::from_pointee(gateway)),
            request_timeout,
        }
    }

    /// Snapshot of the current gateway. A reload never affects a request
    /// that already holds its snapshot.
    pub fn gateway(&self) -> Arc<Gateway> {
        self.gateway.load_full()
    }

    pub fn replace_gateway(&self, gateway: Gateway) {
        self.gateway.store(Arc::new(gateway));
    }

    /// Drive an upstream call, giving up once the request deadline passes.
    pub async fn within_deadline<T>(
        &self,
        operation: Operation,
        call: impl Future<Output = Result<T, GatewayError>>,
    ) -> Result<T, GatewayError> {
        match tokio::time::timeout(self.request_timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                metrics::record_upstream(operation.as_str(), "timeout");
                tracing::warn!(
                    operation = %operation,
                    timeout_secs = self.request_timeout.as_secs(),
                    "Upstream call exceeded request deadline"
                );
                Err(GatewayError::Timeout {
                    operation,
                    elapsed_secs: self.request_timeout.as_secs(),
                })
            }
        }
    }
}

/// HTTP server for the weather gateway.
pub struct HttpServer {
    router: Router,
    config: NimbusConfig,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: NimbusConfig) -> Result<Self, reqwest::Error> {
        let gateway = Gateway::new(config.upstream.clone())?;
        let state = AppState::new(
            gateway,
            Duration::from_secs(config.timeouts.request_secs),
        );
        let router = Self::build_router(&config, state.clone());
        Ok(Self {
            router,
            config,
            state,
        })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &NimbusConfig, state: AppState) -> Router {
        let cors = if config.cors.allow_any_origin {
            CorsLayer::permissive()
        } else {
            CorsLayer::new()
        };

        let layers = ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
            .layer(TraceLayer::new_for_http().make_span_with(request_span))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(cors);

        routing::router(state)
            .layer(middleware::from_fn(track_metrics))
            .layer(layers)
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Configuration updates replace the upstream gateway; the listener
    /// itself is not rebound.
    pub async fn run(
        self,
        listener: TcpListener,
        config_updates: mpsc::UnboundedReceiver<NimbusConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        tokio::spawn(apply_config_updates(
            self.state.clone(),
            self.config.clone(),
            config_updates,
        ));

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Shared handler state.
    pub fn state(&self) -> &AppState {
        &self.state
    }
}

/// Apply reloaded configurations until the sender side goes away.
async fn apply_config_updates(
    state: AppState,
    mut current: NimbusConfig,
    mut updates: mpsc::UnboundedReceiver<NimbusConfig>,
) {
    while let Some(new_config) = updates.recv().await {
        if new_config.listener != current.listener {
            tracing::warn!(
                bind_address = %new_config.listener.bind_address,
                "Listener changes require a restart; keeping current bind address"
            );
        }
        if new_config.timeouts != current.timeouts || new_config.cors != current.cors {
            tracing::warn!("Timeout and CORS changes require a restart");
        }

        if new_config.upstream != current.upstream {
            match Gateway::new(new_config.upstream.clone()) {
                Ok(gateway) => {
                    state.replace_gateway(gateway);
                    tracing::info!(upstream = ?new_config.upstream, "Upstream configuration reloaded");
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to build gateway from reloaded config");
                    continue;
                }
            }
        }
        current = new_config;
    }
}
