//! Upstream gateway subsystem.
//!
//! # Data Flow
//! ```text
//! validated query (LocationQuery | WeatherQuery)
//!     → client.rs (build upstream request, attach API key, GET)
//!     → status check (anything but 200 → UpstreamStatus)
//!     → decode JSON (failure → UpstreamShape)
//!     → reshape.rs (project and truncate)
//!     → LocationSuggestion[] | WeatherResult
//! ```
//!
//! # Design Decisions
//! - One upstream call per request, no retries, no caching
//! - Upstream status codes and bodies are logged, never forwarded
//! - Configuration is injected at construction, so tests point it at a stub

pub mod client;
pub mod error;
pub mod reshape;
pub mod types;

pub use client::Gateway;
pub use error::{GatewayError, Operation};
pub use types::{
    Coordinates, CurrentConditions, CurrentMain, EntryMain, Forecast, ForecastEntry,
    LocationQuery, LocationSuggestion, WeatherCondition, WeatherQuery, WeatherResult,
};
