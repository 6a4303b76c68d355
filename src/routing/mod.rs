//! Request routing subsystem.
//!
//! # Data Flow
//! ```text
//! GET /                          → handlers::home
//! GET /api/location-suggestions  → params::LocationParams::validate → Gateway::resolve_locations
//! GET /api/weather               → params::WeatherParams::validate  → Gateway::resolve_weather
//! anything else                  → 404
//! ```
//!
//! # Design Decisions
//! - Validation is presence/non-emptiness only and happens before any upstream call
//! - Handlers hold no state beyond a gateway snapshot

pub mod handlers;
pub mod params;

use axum::{routing::get, Router};

use crate::http::server::AppState;

/// Route table for the service.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/api/location-suggestions", get(handlers::location_suggestions))
        .route("/api/weather", get(handlers::weather))
        .with_state(state)
}
