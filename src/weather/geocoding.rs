//! City name lookup against the Open-Meteo geocoding API

use std::time::{Duration, Instant};

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use crate::WeatherAppError;
use crate::models::Location;

use super::USER_AGENT;

/// Geocoding response from `OpenMeteo`
#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    results: Option<Vec<GeocodingResult>>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    name: String,
    latitude: f64,
    longitude: f64,
    country: Option<String>,
    timezone: Option<String>,
}

impl From<GeocodingResult> for Location {
    fn from(result: GeocodingResult) -> Self {
        Location {
            name: result.name,
            country: result.country,
            latitude: result.latitude,
            longitude: result.longitude,
            timezone: result.timezone.unwrap_or_else(|| "UTC".to_string()),
        }
    }
}

/// Resolves free-text place names to coordinates
#[derive(Debug, Clone)]
pub struct GeocodingClient {
    client: Client,
    base_url: String,
}

impl GeocodingClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, WeatherAppError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Looks up `city_name` and returns the first match.
    /// Returns `None` when nothing matched or the lookup failed.
    pub async fn locate(&self, city_name: &str) -> Option<Location> {
        match self.search(city_name).await {
            Ok(Some(location)) => Some(location),
            Ok(None) => {
                warn!("No results found for location '{}'", city_name);
                None
            }
            Err(e) => {
                warn!("Error fetching location data for '{}': {}", city_name, e);
                None
            }
        }
    }

    #[instrument(skip(self))]
    async fn search(&self, city_name: &str) -> Result<Option<Location>, WeatherAppError> {
        let start_time = Instant::now();
        let url = format!(
            "{}?name={}&count=1&language=en&format=json",
            self.base_url,
            urlencoding::encode(city_name)
        );
        debug!("Geocoding request URL: {}", url);

        let response = self.client.get(&url).send().await?.error_for_status()?;
        let body: GeocodingResponse = response.json().await?;

        let location = body
            .results
            .unwrap_or_default()
            .into_iter()
            .next()
            .map(Location::from);

        if let Some(location) = &location {
            info!(
                "Geocoded '{}' to {} ({}) in {:.3}s",
                city_name,
                location.name,
                location.format_coordinates(),
                start_time.elapsed().as_secs_f64()
            );
        }

        Ok(location)
    }
}
