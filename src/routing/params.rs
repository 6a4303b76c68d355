//! Query-string parameters and their validation.
//!
//! A repeated key is not an error: the first occurrence wins and later ones
//! are ignored.

use crate::gateway::{Coordinates, GatewayError, LocationQuery, WeatherQuery};

pub const MISSING_QUERY: &str = "Query parameter is required";
pub const MISSING_CITY_COUNTRY: &str = "Both city and country parameters are required";
pub const UNPAIRED_COORDINATES: &str = "Both lat and lon parameters are required together";

/// Decoded query string, in order of appearance.
pub type QueryPairs = Vec<(String, String)>;

/// First value given for `key`.
fn first(pairs: &[(String, String)], key: &str) -> Option<String> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.clone())
}

/// Raw parameters of `/api/location-suggestions`.
#[derive(Debug, Default)]
pub struct LocationParams {
    pub query: Option<String>,
}

impl LocationParams {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            query: first(pairs, "query"),
        }
    }

    pub fn validate(self) -> Result<LocationQuery, GatewayError> {
        let query = non_empty(self.query).ok_or_else(|| GatewayError::validation(MISSING_QUERY))?;
        Ok(LocationQuery { query })
    }
}

/// Raw parameters of `/api/weather`.
#[derive(Debug, Default)]
pub struct WeatherParams {
    pub city: Option<String>,
    pub country: Option<String>,
    pub lat: Option<String>,
    pub lon: Option<String>,
}

impl WeatherParams {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            city: first(pairs, "city"),
            country: first(pairs, "country"),
            lat: first(pairs, "lat"),
            lon: first(pairs, "lon"),
        }
    }

    pub fn validate(self) -> Result<WeatherQuery, GatewayError> {
        let (Some(city), Some(country)) = (non_empty(self.city), non_empty(self.country)) else {
            return Err(GatewayError::validation(MISSING_CITY_COUNTRY));
        };

        let coordinates = match (non_empty(self.lat), non_empty(self.lon)) {
            (Some(lat), Some(lon)) => Some(Coordinates { lat, lon }),
            (None, None) => None,
            _ => return Err(GatewayError::validation(UNPAIRED_COORDINATES)),
        };

        Ok(WeatherQuery {
            city,
            country,
            coordinates,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weather(city: &str, country: &str, lat: Option<&str>, lon: Option<&str>) -> WeatherParams {
        WeatherParams {
            city: Some(city.into()),
            country: Some(country.into()),
            lat: lat.map(Into::into),
            lon: lon.map(Into::into),
        }
    }

    #[test]
    fn test_location_query_required() {
        let err = LocationParams::default().validate().unwrap_err();
        assert_eq!(err.client_message(), MISSING_QUERY);

        let err = LocationParams { query: Some(String::new()) }.validate().unwrap_err();
        assert_eq!(err.client_message(), MISSING_QUERY);
    }

    #[test]
    fn test_location_query_kept_verbatim() {
        let query = LocationParams { query: Some("São Paulo ".into()) }.validate().unwrap();
        assert_eq!(query.query, "São Paulo ");
    }

    #[test]
    fn test_weather_by_name() {
        let query = weather("London", "GB", None, None).validate().unwrap();
        assert_eq!(query.city, "London");
        assert_eq!(query.country, "GB");
        assert!(query.coordinates.is_none());
    }

    #[test]
    fn test_weather_by_coordinates() {
        let query = weather("London", "GB", Some("51.5"), Some("-0.12")).validate().unwrap();
        assert_eq!(
            query.coordinates,
            Some(Coordinates {
                lat: "51.5".into(),
                lon: "-0.12".into()
            })
        );
    }

    #[test]
    fn test_weather_missing_city_or_country() {
        let err = weather("", "GB", None, None).validate().unwrap_err();
        assert_eq!(err.client_message(), MISSING_CITY_COUNTRY);

        let params = WeatherParams {
            city: Some("London".into()),
            ..Default::default()
        };
        assert_eq!(params.validate().unwrap_err().client_message(), MISSING_CITY_COUNTRY);
    }

    #[test]
    fn test_weather_unpaired_coordinates() {
        let err = weather("London", "GB", Some("51.5"), None).validate().unwrap_err();
        assert_eq!(err.client_message(), UNPAIRED_COORDINATES);

        let result = weather("London", "GB", None, Some("")).validate();
        assert!(result.unwrap().coordinates.is_none(), "empty lon counts as absent");
    }

    fn pairs(raw: &[(&str, &str)]) -> QueryPairs {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_repeated_key_takes_first_value() {
        let params = LocationParams::from_pairs(&pairs(&[("query", "Paris"), ("query", "Lyon")]));
        assert_eq!(params.validate().unwrap().query, "Paris");

        let params = WeatherParams::from_pairs(&pairs(&[
            ("city", "London"),
            ("country", "GB"),
            ("city", "Paris"),
            ("units", "imperial"),
        ]));
        let query = params.validate().unwrap();
        assert_eq!(query.city, "London");
        assert_eq!(query.country, "GB");
    }

    #[test]
    fn test_empty_first_value_is_missing() {
        let params = LocationParams::from_pairs(&pairs(&[("query", ""), ("query", "Lyon")]));
        assert_eq!(params.validate().unwrap_err().client_message(), MISSING_QUERY);
    }
}
