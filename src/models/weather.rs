//! Current weather snapshot and display helpers

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Current conditions for a coordinate at request time
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CurrentWeather {
    /// Temperature in Celsius
    pub temperature: f64,
    /// Wind speed in km/h
    pub windspeed: f64,
    /// WMO weather code
    pub weathercode: i32,
    /// Wind direction in degrees (0-360, where 0/360 is North)
    pub winddirection: Option<f64>,
    /// Observation time in the location's local time
    pub observed_at: Option<NaiveDateTime>,
}

impl CurrentWeather {
    /// Convert wind direction from degrees to cardinal direction
    #[must_use]
    pub fn wind_direction_to_cardinal(degrees: f64) -> &'static str {
        const POINTS: [&str; 16] = [
            "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W",
            "WNW", "NW", "NNW",
        ];
        if !degrees.is_finite() {
            return "Unknown";
        }
        // 22.5 degree sectors centred on each point
        let sector = (degrees.rem_euclid(360.0) / 22.5).round() as usize % POINTS.len();
        POINTS[sector]
    }
}
