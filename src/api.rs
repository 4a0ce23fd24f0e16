//! Weather API client for Open-Meteo
//!
//! Two read-only endpoints are used: the geocoding search to resolve a city
//! name and the forecast endpoint for current conditions. Neither requires an
//! API key. Requests are issued once; there is no retry or rate limiting.

use crate::LookupError;
use crate::config::ApiConfig;
use crate::models::{CurrentWeather, Location};
use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// HTTP client for the Open-Meteo geocoding and forecast APIs
#[derive(Debug, Clone)]
pub struct WeatherApiClient {
    /// Shared HTTP client
    client: Client,
    /// Geocoding search endpoint
    geocoding_url: String,
    /// Forecast endpoint
    forecast_url: String,
}

impl WeatherApiClient {
    /// Create a new weather API client
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        Ok(Self {
            client,
            geocoding_url: config.geocoding_url.clone(),
            forecast_url: config.forecast_url.clone(),
        })
    }

    /// Resolve a city name to its best geocoding match
    #[instrument(skip(self))]
    pub async fn geocode(&self, name: &str) -> std::result::Result<Location, LookupError> {
        let url = format!(
            "{}?name={}&count=1",
            self.geocoding_url,
            urlencoding::encode(name)
        );
        debug!("Geocoding request URL: {}", url);

        let start_time = Instant::now();
        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            warn!("Geocoding request for '{}' failed with status {}", name, status);
            return Err(LookupError::GeocodingUnavailable { status });
        }

        let body: openmeteo::GeocodingResponse = response.json().await?;

        let Some(result) = body.results.unwrap_or_default().into_iter().next() else {
            warn!("No results found for location '{}'", name);
            return Err(LookupError::CityNotFound {
                city: name.to_string(),
            });
        };

        let location = Location::from(result);
        info!(
            "Geocoded '{}' to {} ({}) in {:.3}s",
            name,
            location.name,
            location.format_coordinates(),
            start_time.elapsed().as_secs_f64()
        );

        Ok(location)
    }

    /// Get current weather for a resolved location
    #[instrument(skip(self, location), fields(lat = location.latitude, lon = location.longitude))]
    pub async fn current_weather(
        &self,
        location: &Location,
    ) -> std::result::Result<CurrentWeather, LookupError> {
        let url = format!(
            "{}?latitude={}&longitude={}&current_weather=true",
            self.forecast_url, location.latitude, location.longitude
        );
        debug!("Forecast request URL: {}", url);

        let start_time = Instant::now();
        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            warn!(
                "Forecast request for {} failed with status {}",
                location.format_coordinates(),
                status
            );
            return Err(LookupError::WeatherUnavailable { status });
        }

        let body: openmeteo::ForecastResponse = response.json().await?;

        let Some(current) = body.current_weather else {
            warn!(
                "No current weather data for {}",
                location.format_coordinates()
            );
            return Err(LookupError::WeatherDataMissing);
        };

        let weather = CurrentWeather::try_from(current)?;
        info!(
            "Retrieved current weather for {} in {:.3}s: {} °C, code {}",
            location.name,
            start_time.elapsed().as_secs_f64(),
            weather.temperature,
            weather.weathercode
        );

        Ok(weather)
    }
}

/// Open-Meteo API response structures
mod openmeteo {
    use crate::models::{CurrentWeather, Location};
    use crate::LookupError;
    use chrono::NaiveDateTime;
    use serde::Deserialize;

    /// Geocoding response from Open-Meteo
    #[derive(Debug, Deserialize)]
    pub struct GeocodingResponse {
        pub results: Option<Vec<GeocodingResult>>,
    }

    #[derive(Debug, Deserialize)]
    pub struct GeocodingResult {
        pub name: String,
        pub latitude: f64,
        pub longitude: f64,
        pub country: Option<String>,
        pub admin1: Option<String>,
    }

    impl From<GeocodingResult> for Location {
        fn from(result: GeocodingResult) -> Self {
            Location {
                country: result.country.filter(|c| !c.trim().is_empty()),
                admin1: result.admin1,
                ..Location::new(result.name, result.latitude, result.longitude)
            }
        }
    }

    /// Forecast response with only the current-conditions block requested
    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        pub current_weather: Option<CurrentWeatherData>,
    }

    #[derive(Debug, Deserialize)]
    pub struct CurrentWeatherData {
        pub temperature: f64,
        pub windspeed: f64,
        // Integral, but may arrive as a float such as 3.0
        pub weathercode: f64,
        pub winddirection: Option<f64>,
        pub time: Option<String>,
    }

    impl TryFrom<CurrentWeatherData> for CurrentWeather {
        type Error = LookupError;

        fn try_from(data: CurrentWeatherData) -> Result<Self, Self::Error> {
            let code = data.weathercode;
            if code.fract() != 0.0 || code < f64::from(i32::MIN) || code > f64::from(i32::MAX) {
                return Err(LookupError::unexpected(format!(
                    "invalid weather code {code}"
                )));
            }

            let observed_at = data
                .time
                .as_deref()
                .and_then(|t| NaiveDateTime::parse_from_str(t, "%Y-%m-%dT%H:%M").ok());

            Ok(CurrentWeather {
                temperature: data.temperature,
                windspeed: data.windspeed,
                weathercode: code as i32,
                winddirection: data.winddirection,
                observed_at,
            })
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_geocoding_response_without_results() {
            let body: GeocodingResponse = serde_json::from_str(r#"{"generationtime_ms":0.5}"#).unwrap();
            assert!(body.results.is_none());
        }

        #[test]
        fn test_geocoding_result_to_location() {
            let body: GeocodingResponse = serde_json::from_str(
                r#"{"results":[{"id":2643743,"name":"London","latitude":51.50853,"longitude":-0.12574,"country":"United Kingdom","admin1":"England"}]}"#,
            )
            .unwrap();
            let location: Location = body.results.unwrap().remove(0).into();
            assert_eq!(location.name, "London");
            assert_eq!(location.country.as_deref(), Some("United Kingdom"));
            assert_eq!(location.admin1.as_deref(), Some("England"));
        }

        #[test]
        fn test_current_weather_conversion() {
            let body: ForecastResponse = serde_json::from_str(
                r#"{"current_weather":{"temperature":15.2,"windspeed":10.5,"winddirection":250.0,"weathercode":3,"is_day":1,"time":"2024-05-01T12:00"}}"#,
            )
            .unwrap();
            let weather = CurrentWeather::try_from(body.current_weather.unwrap()).unwrap();
            assert_eq!(weather.weathercode, 3);
            assert_eq!(weather.winddirection, Some(250.0));
            assert_eq!(
                weather.observed_at.map(|t| t.to_string()).as_deref(),
                Some("2024-05-01 12:00:00")
            );
        }

        #[test]
        fn test_unparseable_time_is_dropped() {
            let body: ForecastResponse = serde_json::from_str(
                r#"{"current_weather":{"temperature":1.0,"windspeed":2.0,"weathercode":0,"time":"yesterday"}}"#,
            )
            .unwrap();
            let weather = CurrentWeather::try_from(body.current_weather.unwrap()).unwrap();
            assert!(weather.observed_at.is_none());
            assert!(weather.winddirection.is_none());
        }

        #[test]
        fn test_empty_country_is_absent() {
            let body: GeocodingResponse = serde_json::from_str(
                r#"{"results":[{"name":"Atlantis","latitude":0.0,"longitude":0.0,"country":""}]}"#,
            )
            .unwrap();
            let location: Location = body.results.unwrap().remove(0).into();
            assert!(location.country.is_none());
            assert!(location.admin1.is_none());
        }

        #[test]
        fn test_float_weather_code() {
            let body: ForecastResponse = serde_json::from_str(
                r#"{"current_weather":{"temperature":1.0,"windspeed":2.0,"weathercode":61.0}}"#,
            )
            .unwrap();
            let weather = CurrentWeather::try_from(body.current_weather.unwrap()).unwrap();
            assert_eq!(weather.weathercode, 61);
        }

        #[test]
        fn test_non_integral_weather_code_is_rejected() {
            for code in ["3.7", "1e12", "-0.5"] {
                let body: ForecastResponse = serde_json::from_str(&format!(
                    r#"{{"current_weather":{{"temperature":1.0,"windspeed":2.0,"weathercode":{code}}}}}"#
                ))
                .unwrap();
                let result = CurrentWeather::try_from(body.current_weather.unwrap());
                assert!(
                    matches!(result, Err(LookupError::UnexpectedFailure { .. })),
                    "code {code} accepted"
                );
            }
        }
    }
}
