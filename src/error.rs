//! Error types for weather lookups
//!
//! Every variant's `Display` output is the message shown to the user as-is.
//! Technical details (HTTP status, transport errors) are kept on the variant
//! for logging.

use reqwest::StatusCode;
use thiserror::Error;

/// Terminal failure of a single lookup
#[derive(Error, Debug)]
pub enum LookupError {
    /// The city name was empty or whitespace only
    #[error("Please enter a city name!")]
    EmptyInput,

    /// The geocoding endpoint answered with a non-success status
    #[error("Failed to fetch city data")]
    GeocodingUnavailable { status: StatusCode },

    /// Geocoding succeeded but returned no match
    #[error("City not found. Try another name or check spelling.")]
    CityNotFound { city: String },

    /// The forecast endpoint answered with a non-success status
    #[error("Failed to fetch weather data")]
    WeatherUnavailable { status: StatusCode },

    /// The forecast response carried no `current_weather` block
    #[error("Weather data not available for this location")]
    WeatherDataMissing,

    /// Transport failure, malformed payload or anything else
    #[error("Something went wrong. Try again later.")]
    UnexpectedFailure { detail: String },
}

impl LookupError {
    /// Create an unexpected failure from any displayable cause
    pub fn unexpected<S: Into<String>>(detail: S) -> Self {
        Self::UnexpectedFailure {
            detail: detail.into(),
        }
    }

    /// Stable machine-readable code for this error
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            LookupError::EmptyInput => "empty_input",
            LookupError::GeocodingUnavailable { .. } => "geocoding_unavailable",
            LookupError::CityNotFound { .. } => "city_not_found",
            LookupError::WeatherUnavailable { .. } => "weather_unavailable",
            LookupError::WeatherDataMissing => "weather_data_missing",
            LookupError::UnexpectedFailure { .. } => "unexpected_failure",
        }
    }

    /// Get the user-facing message
    #[must_use]
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::unexpected(format!("malformed response body: {err}"))
        } else {
            Self::unexpected(format!("request failed: {err}"))
        }
    }
}
