//! `weathernow` - current weather for a city name
//!
//! Resolves a free-text city name through the Open-Meteo geocoding API, then
//! fetches current conditions for the resolved coordinates and maps the WMO
//! weather code to a readable description.

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod lookup;
pub mod models;
pub mod weather_codes;
pub mod web;

// Re-export core types for public API
pub use api::WeatherApiClient;
pub use crate::config::WeatherNowConfig;
pub use error::LookupError;
pub use lookup::{LookupState, WeatherLookup};
pub use models::{CurrentWeather, Location, WeatherReport};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
