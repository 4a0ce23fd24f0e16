//! Weather report handed to the presentation layer

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{CurrentWeather, Location};
use crate::weather_codes;

/// Result of a successful lookup
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherReport {
    /// Resolved city name
    pub city: String,
    /// Country name, if the geocoder returned one
    pub country: Option<String>,
    /// Temperature in Celsius
    pub temperature: f64,
    /// Wind speed in km/h
    pub windspeed: f64,
    /// WMO weather code
    pub weathercode: i32,
    /// Human-readable sky condition
    pub description: String,
    /// Wind direction in degrees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winddirection: Option<f64>,
    /// Observation time in the location's local time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_at: Option<NaiveDateTime>,
}

impl WeatherReport {
    /// Assemble a report from the resolved location and its current weather
    #[must_use]
    pub fn new(location: Location, weather: CurrentWeather) -> Self {
        Self {
            city: location.name,
            country: location.country,
            temperature: weather.temperature,
            windspeed: weather.windspeed,
            weathercode: weather.weathercode,
            description: weather_codes::describe(weather.weathercode).into_owned(),
            winddirection: weather.winddirection,
            observed_at: weather.observed_at,
        }
    }

    /// City with country suffix, e.g. "London, United Kingdom"
    #[must_use]
    pub fn display_name(&self) -> String {
        match self.country.as_deref() {
            Some(country) if !country.is_empty() => format!("{}, {}", self.city, country),
            _ => self.city.clone(),
        }
    }

    /// Format temperature with unit
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{} °C", self.temperature)
    }

    /// Format wind speed, with cardinal direction when known
    #[must_use]
    pub fn format_wind(&self) -> String {
        match self.winddirection {
            Some(degrees) => format!(
                "{} km/h {}",
                self.windspeed,
                CurrentWeather::wind_direction_to_cardinal(degrees)
            ),
            None => format!("{} km/h", self.windspeed),
        }
    }

    /// Format condition text with its raw code
    #[must_use]
    pub fn format_condition(&self) -> String {
        format!("{} (code {})", self.description, self.weathercode)
    }
}

impl fmt::Display for WeatherReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.display_name())?;
        writeln!(f, "🌡 {}", self.format_temperature())?;
        writeln!(f, "💨 Wind: {}", self.format_wind())?;
        write!(f, "⛅ {}", self.format_condition())
    }
}
