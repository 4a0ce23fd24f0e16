//! Location model for a resolved geocoding result

use serde::{Deserialize, Serialize};

/// A place resolved from a free-text name
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Location {
    /// Place name as returned by the geocoder
    pub name: String,
    /// Country name, when the geocoder knows it
    pub country: Option<String>,
    /// First-level administrative region (state, province, ...)
    pub admin1: Option<String>,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Location {
    /// Create a new location
    #[must_use]
    pub fn new(name: String, latitude: f64, longitude: f64) -> Self {
        Self {
            name,
            country: None,
            admin1: None,
            latitude,
            longitude,
        }
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}
