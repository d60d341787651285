//! Location model for geographic coordinates and metadata

use serde::{Deserialize, Serialize};

/// A geocoded place
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Location {
    /// Display name returned by the geocoder
    pub name: String,
    /// Country name, when the geocoder knows it
    pub country: Option<String>,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// IANA timezone of the place
    pub timezone: String,
}

/// Location payload handed to the browser for its recent-searches list.
/// `searched_at` is filled in client-side.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StoredLocation {
    pub name: String,
    pub country: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub searched_at: Option<String>,
}

impl Location {
    /// Cache key for a forecast at exactly the coordinates put in the request URL
    #[must_use]
    pub fn forecast_cache_key(latitude: f64, longitude: f64) -> String {
        format!("forecast:{latitude}:{longitude}")
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }

    #[must_use]
    pub fn to_stored(&self) -> StoredLocation {
        StoredLocation {
            name: self.name.clone(),
            country: self.country.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
            searched_at: None,
        }
    }
}
