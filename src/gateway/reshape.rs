//! Upstream payload → client payload.
//!
//! Pure functions; no I/O happens here.

use crate::gateway::error::{GatewayError, Operation};
use crate::gateway::types::{
    CurrentConditions, CurrentMain, EntryMain, Forecast, ForecastEntry, GeoRecord,
    LocationSuggestion, UpstreamEntry, UpstreamForecast, WeatherResult,
};

/// Number of forecast entries returned to clients.
pub const FORECAST_LEN: usize = 5;

/// Map geocoding records to suggestions, keeping upstream order.
pub(crate) fn suggestions(records: Vec<GeoRecord>) -> Vec<LocationSuggestion> {
    records
        .into_iter()
        .map(|record| LocationSuggestion {
            name: record.name,
            lat: record.lat,
            lon: record.lon,
            country: record.country,
            state: record.state.unwrap_or_default(),
        })
        .collect()
}

/// Build the weather result from the forecast list.
///
/// `current` comes from the first entry; `forecast.list` is the first
/// [`FORECAST_LEN`] entries in upstream order.
pub(crate) fn weather(forecast: UpstreamForecast) -> Result<WeatherResult, GatewayError> {
    let entries = forecast
        .list
        .into_iter()
        .take(FORECAST_LEN)
        .enumerate()
        .map(|(index, raw)| {
            serde_json::from_value::<UpstreamEntry>(raw).map_err(|e| {
                GatewayError::shape(Operation::Weather, format!("forecast entry {index}: {e}"))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let first = entries
        .first()
        .ok_or_else(|| GatewayError::shape(Operation::Weather, "empty forecast list"))?;

    let humidity = first.main.humidity.clone().ok_or_else(|| {
        GatewayError::shape(Operation::Weather, "first forecast entry has no humidity")
    })?;

    let current = CurrentConditions {
        main: CurrentMain {
            temp: first.main.temp.clone(),
            humidity,
        },
        weather: first.weather.clone(),
    };

    let list = entries
        .into_iter()
        .map(|entry| ForecastEntry {
            dt_txt: entry.dt_txt,
            main: EntryMain {
                temp: entry.main.temp,
            },
            weather: entry.weather,
        })
        .collect();

    Ok(WeatherResult {
        current,
        forecast: Forecast { list },
    })
}
