//! Forecast client for the Open-Meteo API
//!
//! Fetches current conditions plus hourly and daily series for a fixed
//! seven-day horizon. Transient failures are retried with exponential backoff
//! and successful bodies can be kept in the persistent cache; callers only ever
//! see a parsed response or `None`.

use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use tracing::{debug, info, instrument, warn};

use crate::WeatherAppError;
use crate::cache::PersistentCache;
use crate::models::{ForecastResponse, Location};

use super::USER_AGENT;

pub const CURRENT_FIELDS: &str = "temperature_2m,apparent_temperature,relative_humidity_2m,weather_code,surface_pressure,wind_speed_10m,wind_direction_10m,uv_index";
pub const HOURLY_FIELDS: &str = "temperature_2m,weather_code,wind_speed_10m";
pub const DAILY_FIELDS: &str =
    "temperature_2m_max,temperature_2m_min,weather_code,precipitation_sum,wind_speed_10m_max";
pub const FORECAST_DAYS: u8 = 7;

/// Response cache attached to the forecast client
#[derive(Clone)]
pub struct ForecastCache {
    pub store: Arc<PersistentCache>,
    pub ttl: Duration,
}

/// Fetches forecasts for coordinates
#[derive(Clone)]
pub struct ForecastClient {
    client: ClientWithMiddleware,
    base_url: String,
    cache: Option<ForecastCache>,
}

impl ForecastClient {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        max_retries: u32,
    ) -> Result<Self, WeatherAppError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        let retry_policy = ExponentialBackoff::builder()
            .retry_bounds(Duration::from_millis(200), Duration::from_secs(5))
            .build_with_max_retries(max_retries);

        let client = ClientBuilder::new(http)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            client,
            base_url: base_url.into(),
            cache: None,
        })
    }

    /// Keep successful responses in `cache` for reuse
    #[must_use]
    pub fn with_cache(mut self, cache: ForecastCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Request URL for the given coordinates
    #[must_use]
    pub fn forecast_url(&self, latitude: f64, longitude: f64) -> String {
        format!(
            "{}?latitude={}&longitude={}&current={}&hourly={}&daily={}&timezone=auto&forecast_days={}",
            self.base_url, latitude, longitude, CURRENT_FIELDS, HOURLY_FIELDS, DAILY_FIELDS, FORECAST_DAYS
        )
    }

    /// Fetches the forecast for the given coordinates.
    /// Returns `None` on network failure, timeout, error status or bad payload.
    pub async fn fetch(&self, latitude: f64, longitude: f64) -> Option<ForecastResponse> {
        match self.try_fetch(latitude, longitude).await {
            Ok(response) => Some(response),
            Err(e) => {
                warn!("Error fetching weather data: {}", e);
                None
            }
        }
    }

    #[instrument(skip(self))]
    async fn try_fetch(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<ForecastResponse, WeatherAppError> {
        let cache_key = Location::forecast_cache_key(latitude, longitude);

        if let Some(body) = self.cached_body(&cache_key).await {
            match serde_json::from_str(&body) {
                Ok(response) => {
                    debug!("Serving forecast from cache");
                    return Ok(response);
                }
                Err(e) => warn!("Discarding unreadable cached forecast: {}", e),
            }
        }

        let start_time = Instant::now();
        let url = self.forecast_url(latitude, longitude);
        debug!("OpenMeteo API request URL: {}", url);

        let response = self.client.get(&url).send().await?.error_for_status()?;
        let body = response.text().await?;
        let forecast: ForecastResponse = serde_json::from_str(&body)?;

        info!(
            "Retrieved forecast in {:.3}s",
            start_time.elapsed().as_secs_f64()
        );

        self.store_body(&cache_key, body).await;
        Ok(forecast)
    }

    async fn cached_body(&self, key: &str) -> Option<String> {
        let cache = self.cache.as_ref()?;
        match cache.store.get::<String>(key).await {
            Ok(body) => body,
            Err(e) => {
                warn!("Forecast cache read failed: {}", e);
                None
            }
        }
    }

    async fn store_body(&self, key: &str, body: String) {
        let Some(cache) = &self.cache else {
            return;
        };
        if let Err(e) = cache.store.put(key, body, cache.ttl).await {
            warn!("Forecast cache write failed: {}", e);
        }
    }
}
