//! Upstream HTTP calls.

use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;

use crate::config::UpstreamConfig;
use crate::gateway::error::{GatewayError, Operation};
use crate::gateway::reshape;
use crate::gateway::types::{
    GeoRecord, LocationQuery, LocationSuggestion, UpstreamForecast, WeatherQuery, WeatherResult,
};
use crate::observability::metrics;

/// Longest upstream error body kept in logs.
const LOGGED_BODY_LIMIT: usize = 256;

/// Client for the geocoding and forecast endpoints.
///
/// Holds no per-request state; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct Gateway {
    client: reqwest::Client,
    config: UpstreamConfig,
}

impl Gateway {
    /// Build a gateway from upstream settings.
    pub fn new(config: UpstreamConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    pub fn config(&self) -> &UpstreamConfig {
        &self.config
    }

    /// Look up places matching a free-text query.
    pub async fn resolve_locations(
        &self,
        query: &LocationQuery,
    ) -> Result<Vec<LocationSuggestion>, GatewayError> {
        let params = vec![
            ("q", query.query.clone()),
            ("limit", self.config.suggestion_limit.to_string()),
        ];

        let records: Vec<GeoRecord> = self
            .fetch(Operation::LocationSuggestions, &self.config.geo_url, params)
            .await?;

        tracing::debug!(count = records.len(), "Geocoding records received");
        Ok(reshape::suggestions(records))
    }

    /// Fetch the forecast for a place and reduce it to current conditions plus
    /// the next few entries.
    pub async fn resolve_weather(&self, query: &WeatherQuery) -> Result<WeatherResult, GatewayError> {
        let mut params = match &query.coordinates {
            Some(coords) => vec![("lat", coords.lat.clone()), ("lon", coords.lon.clone())],
            None => vec![("q", format!("{},{}", query.city, query.country))],
        };
        params.push(("units", self.config.units.as_str().to_string()));

        let forecast: UpstreamForecast = self
            .fetch(Operation::Weather, &self.config.forecast_url, params)
            .await?;

        tracing::debug!(entries = forecast.list.len(), "Forecast received");
        let result = reshape::weather(forecast);
        if let Err(e) = &result {
            metrics::record_upstream(Operation::Weather.as_str(), "shape_error");
            tracing::warn!(error = %e, "Forecast payload rejected");
        }
        result
    }

    /// GET `url` with `params` plus the API key and decode a 200 JSON body.
    async fn fetch<T: DeserializeOwned>(
        &self,
        operation: Operation,
        url: &str,
        mut params: Vec<(&'static str, String)>,
    ) -> Result<T, GatewayError> {
        if let Some(key) = &self.config.api_key {
            params.push(("appid", key.clone()));
        }

        let start = Instant::now();
        let response = self
            .client
            .get(url)
            .query(&params)
            .send()
            .await
            .map_err(|source| {
                metrics::record_upstream(operation.as_str(), "transport_error");
                tracing::warn!(operation = %operation, error = %source, "Upstream unreachable");
                GatewayError::Transport { operation, source }
            })?;

        let status = response.status();
        metrics::record_upstream_latency(operation.as_str(), start);

        if status != reqwest::StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            metrics::record_upstream(operation.as_str(), "bad_status");
            tracing::warn!(
                operation = %operation,
                status = %status,
                body = %truncate(&body, LOGGED_BODY_LIMIT),
                "Upstream returned non-OK status"
            );
            return Err(GatewayError::UpstreamStatus {
                operation,
                status: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|source| {
                metrics::record_upstream(operation.as_str(), "transport_error");
                tracing::warn!(operation = %operation, error = %source, "Upstream body could not be read");
                GatewayError::Transport { operation, source }
            })?;

        let decoded = serde_json::from_slice(&bytes).map_err(|e| {
            metrics::record_upstream(operation.as_str(), "shape_error");
            tracing::warn!(operation = %operation, error = %e, "Upstream payload could not be decoded");
            GatewayError::shape(operation, e.to_string())
        })?;

        metrics::record_upstream(operation.as_str(), "ok");
        Ok(decoded)
    }
}

fn truncate(body: &str, limit: usize) -> &str {
    match body.char_indices().nth(limit) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
