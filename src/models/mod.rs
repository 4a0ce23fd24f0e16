//! Data models for the weather lookup
//!
//! - Location: a resolved geocoding result
//! - Weather: current conditions for a coordinate
//! - Report: the assembled result handed to the presentation layer

pub mod location;
pub mod report;
pub mod weather;

pub use location::Location;
pub use report::WeatherReport;
pub use weather::CurrentWeather;
