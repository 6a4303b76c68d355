//! Route handlers.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};

use crate::gateway::{GatewayError, LocationSuggestion, Operation, WeatherResult};
use crate::http::server::AppState;
use crate::routing::params::{LocationParams, QueryPairs, WeatherParams};

/// Body of `GET /`.
pub const GREETING: &str = "Nimbus Backend";

pub const MALFORMED_QUERY: &str = "Malformed query string";

pub async fn home() -> &'static str {
    GREETING
}

pub async fn location_suggestions(
    State(state): State<AppState>,
    pairs: Result<Query<QueryPairs>, QueryRejection>,
) -> Result<Json<Vec<LocationSuggestion>>, GatewayError> {
    let Query(pairs) = pairs.map_err(reject)?;
    let query = LocationParams::from_pairs(&pairs).validate()?;

    let gateway = state.gateway();
    let suggestions = state
        .within_deadline(
            Operation::LocationSuggestions,
            gateway.resolve_locations(&query),
        )
        .await?;
    tracing::info!(count = suggestions.len(), "Location suggestions resolved");
    Ok(Json(suggestions))
}

pub async fn weather(
    State(state): State<AppState>,
    pairs: Result<Query<QueryPairs>, QueryRejection>,
) -> Result<Json<WeatherResult>, GatewayError> {
    let Query(pairs) = pairs.map_err(reject)?;
    let query = WeatherParams::from_pairs(&pairs).validate()?;

    let gateway = state.gateway();
    let result = state
        .within_deadline(Operation::Weather, gateway.resolve_weather(&query))
        .await?;
    tracing::info!(
        by_coordinates = query.coordinates.is_some(),
        entries = result.forecast.list.len(),
        "Weather resolved"
    );
    Ok(Json(result))
}

fn reject(rejection: QueryRejection) -> GatewayError {
    tracing::debug!(error = %rejection.body_text(), "Query string rejected");
    GatewayError::validation(MALFORMED_QUERY)
}
