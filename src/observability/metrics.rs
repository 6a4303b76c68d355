//! Metrics collection and exposition.
//!
//! # Metrics
//! - `nimbus_requests_total` (counter): requests by method, route, status
//! - `nimbus_request_duration_seconds` (histogram): latency per route
//! - `nimbus_upstream_requests_total` (counter): upstream calls by operation, outcome
//! - `nimbus_upstream_duration_seconds` (histogram): upstream latency per operation
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade; without an installed
//!   recorder every call is a no-op
//! - Prometheus exporter is opt-in via configuration

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a completed inbound request.
pub fn record_request(method: &str, status: u16, route: &str, start: Instant) {
    metrics::counter!(
        "nimbus_requests_total",
        "method" => method.to_string(),
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("nimbus_request_duration_seconds", "route" => route.to_string())
        .record(start.elapsed().as_secs_f64());
}

/// Record the outcome of an upstream call.
pub fn record_upstream(operation: &'static str, outcome: &'static str) {
    metrics::counter!(
        "nimbus_upstream_requests_total",
        "operation" => operation,
        "outcome" => outcome
    )
    .increment(1);
}

/// Record time spent waiting for upstream response headers.
pub fn record_upstream_latency(operation: &'static str, start: Instant) {
    metrics::histogram!("nimbus_upstream_duration_seconds", "operation" => operation)
        .record(start.elapsed().as_secs_f64());
}
