//! Request and response shapes on both sides of the gateway.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// Upstream weather condition object, passed through untouched.
pub type WeatherCondition = Value;

/// Validated location lookup request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationQuery {
    pub query: String,
}

/// Coordinates as the client sent them. Parsing is left to the upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coordinates {
    pub lat: String,
    pub lon: String,
}

/// Validated forecast request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherQuery {
    pub city: String,
    pub country: String,
    /// When present the forecast is looked up by position instead of by name.
    pub coordinates: Option<Coordinates>,
}

// ---------------------------------------------------------------------------
// Client-facing shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSuggestion {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub country: String,
    /// Empty when the upstream has no administrative region for the place.
    pub state: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherResult {
    pub current: CurrentConditions,
    pub forecast: Forecast,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub main: CurrentMain,
    pub weather: Vec<WeatherCondition>,
}

/// Numbers are carried as the upstream wrote them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentMain {
    pub temp: Number,
    pub humidity: Number,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub list: Vec<ForecastEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub dt_txt: String,
    pub main: EntryMain,
    pub weather: Vec<WeatherCondition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryMain {
    pub temp: Number,
}

// ---------------------------------------------------------------------------
// Upstream shapes
// ---------------------------------------------------------------------------

/// One record of the geocoding endpoint. Extra fields (`local_names`, ...) are ignored.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GeoRecord {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub country: String,
    #[serde(default)]
    pub state: Option<String>,
}

/// Forecast endpoint body. Entries stay raw so only the ones we keep are decoded.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct UpstreamForecast {
    pub list: Vec<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct UpstreamEntry {
    #[serde(default)]
    pub dt_txt: String,
    pub main: UpstreamMain,
    #[serde(default)]
    pub weather: Vec<WeatherCondition>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct UpstreamMain {
    pub temp: Number,
    #[serde(default)]
    pub humidity: Option<Number>,
}
