//! Shared utilities for integration and load testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::Path;

use nimbus::config::{load_config, ConfigWatcher, NimbusConfig};
use nimbus::http::HttpServer;
use nimbus::lifecycle::Shutdown;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use notify::RecommendedWatcher;
use tokio::sync::mpsc;
use wiremock::MockServer;

pub const GEO_PATH: &str = "/geo/1.0/direct";
pub const FORECAST_PATH: &str = "/data/2.5/forecast";
pub const TEST_API_KEY: &str = "test-api-key";

/// A running gateway wired to a stub upstream.
pub struct TestApp {
    pub address: SocketAddr,
    pub upstream: MockServer,
    pub client: reqwest::Client,
    shutdown: Shutdown,
    _watcher: Option<RecommendedWatcher>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(|_| {}).await
    }

    /// Start the gateway after letting the caller adjust the configuration.
    pub async fn spawn_with(customize: impl FnOnce(&mut NimbusConfig)) -> Self {
        let upstream = MockServer::start().await;

        let mut config = NimbusConfig::default();
        config.listener.bind_address = "127.0.0.1:0".into();
        config.upstream.api_key = Some(TEST_API_KEY.into());
        config.upstream.geo_url = format!("{}{}", upstream.uri(), GEO_PATH);
        config.upstream.forecast_url = format!("{}{}", upstream.uri(), FORECAST_PATH);
        customize(&mut config);

        let (_, config_updates) = mpsc::unbounded_channel();
        Self::start(upstream, config, config_updates, None).await
    }

    /// Start the gateway from a config file that is watched for edits.
    pub async fn spawn_watching(upstream: MockServer, path: &Path) -> Self {
        let config = load_config(path).unwrap();
        let (watcher, config_updates) = ConfigWatcher::new(path);
        let handle = watcher.run().unwrap();
        Self::start(upstream, config, config_updates, Some(handle)).await
    }

    async fn start(
        upstream: MockServer,
        config: NimbusConfig,
        config_updates: mpsc::UnboundedReceiver<NimbusConfig>,
        watcher: Option<RecommendedWatcher>,
    ) -> Self {
        let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
        let address = listener.local_addr().unwrap();

        let server = HttpServer::new(config).unwrap();
        let shutdown = Shutdown::new();
        let server_shutdown = shutdown.subscribe();

        tokio::spawn(async move {
            let _ = server.run(listener, config_updates, server_shutdown).await;
        });

        let client = reqwest::Client::builder().no_proxy().build().unwrap();

        Self {
            address,
            upstream,
            client,
            shutdown,
            _watcher: watcher,
        }
    }

    pub fn url(&self, path_and_query: &str) -> String {
        format!("http://{}{}", self.address, path_and_query)
    }

    pub async fn get(&self, path_and_query: &str) -> reqwest::Response {
        self.client
            .get(self.url(path_and_query))
            .send()
            .await
            .expect("gateway unreachable")
    }

    /// Number of requests the stub upstream has seen.
    pub async fn upstream_calls(&self) -> usize {
        self.upstream
            .received_requests()
            .await
            .map(|requests| requests.len())
            .unwrap_or(0)
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// One upstream forecast entry, shaped like the real API.
pub fn forecast_entry(index: usize, temp: f64, humidity: u64) -> Value {
    json!({
        "dt": 1_704_110_400 + index * 10_800,
        "main": {
            "temp": temp,
            "feels_like": temp - 1.0,
            "pressure": 1015,
            "humidity": humidity
        },
        "weather": [{ "id": 800, "main": "Clear", "description": "clear sky", "icon": "01d" }],
        "wind": { "speed": 4.1, "deg": 250 },
        "dt_txt": format!("2024-01-01 {:02}:00:00", (index * 3) % 24)
    })
}

/// Upstream forecast body with `n` entries.
///
/// The first entry has temp 15.2 and humidity 70; entry `i > 0` has temp `15 + i`.
pub fn forecast_body(n: usize) -> Value {
    let list: Vec<Value> = (0..n)
        .map(|i| {
            let temp = if i == 0 { 15.2 } else { 15.0 + i as f64 };
            forecast_entry(i, temp, 70 + i as u64)
        })
        .collect();
    json!({ "cod": "200", "cnt": n, "list": list, "city": { "name": "London" } })
}
