//! City Forecast Module
//!
//! Sequences geocoding, the forecast fetch and the presentation mapping into
//! the view the HTML pages and the JSON API render.

use std::sync::Arc;

use anyhow::Context;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::cache::PersistentCache;
use crate::config::AppConfig;
use crate::models::{
    CurrentConditions, DailyForecastRow, ForecastResponse, HourlyForecastRow, Location,
    WeatherCodeInfo,
};
use crate::presentation::{format_wind_direction, process_daily_forecast, process_hourly_forecast};
use crate::weather::{ForecastCache, ForecastClient, GeocodingClient, weather_info};
use crate::{Result, WeatherAppError};

/// Everything a forecast page needs
#[derive(Debug, Clone, Serialize)]
pub struct ForecastView {
    pub location: Location,
    pub current_weather: CurrentConditions,
    pub weather_info: WeatherCodeInfo,
    pub hourly_forecast: Vec<HourlyForecastRow>,
    pub daily_forecast: Vec<DailyForecastRow>,
    pub wind_direction_text: String,
    pub weather_icon: &'static str,
    /// Location serialized for browser local storage
    pub location_json: String,
}

impl ForecastView {
    /// Maps a raw forecast into display form
    pub fn assemble(location: Location, forecast: ForecastResponse) -> Result<Self> {
        let current = forecast.current.unwrap_or_default();
        let info = weather_info(current.weather_code.unwrap_or(0));

        let hourly_forecast = process_hourly_forecast(forecast.hourly.as_ref());
        let daily_forecast = process_daily_forecast(forecast.daily.as_ref());
        debug!(
            "Mapped {} hourly and {} daily rows",
            hourly_forecast.len(),
            daily_forecast.len()
        );

        let location_json = serde_json::to_string(&location.to_stored())?;

        Ok(Self {
            wind_direction_text: format_wind_direction(current.wind_direction),
            weather_icon: info.icon,
            weather_info: info,
            current_weather: current,
            hourly_forecast,
            daily_forecast,
            location,
            location_json,
        })
    }
}

/// Trims a submitted city name, rejecting blank input
pub fn validate_city_name(raw: &str) -> Result<&str> {
    let city = raw.trim();
    if city.is_empty() {
        return Err(WeatherAppError::validation("Please enter a city name"));
    }
    Ok(city)
}

/// Geocode, fetch and map a forecast for a city name
pub struct ForecastService {
    geocoder: GeocodingClient,
    forecasts: ForecastClient,
}

impl ForecastService {
    pub fn new(geocoder: GeocodingClient, forecasts: ForecastClient) -> Self {
        Self {
            geocoder,
            forecasts,
        }
    }

    /// Builds both clients from configuration, attaching `cache` when given
    pub fn from_config(
        config: &AppConfig,
        cache: Option<Arc<PersistentCache>>,
    ) -> anyhow::Result<Self> {
        let geocoder =
            GeocodingClient::new(&config.weather.geocoding_url, config.weather.timeout())
                .context("Failed to create geocoding client")?;

        let mut forecasts = ForecastClient::new(
            &config.weather.forecast_url,
            config.weather.timeout(),
            config.weather.max_retries,
        )
        .context("Failed to create forecast client")?;

        if let Some(store) = cache {
            forecasts = forecasts.with_cache(ForecastCache {
                store,
                ttl: config.cache.ttl(),
            });
        }

        Ok(Self::new(geocoder, forecasts))
    }

    /// Runs the full lookup for `city`
    pub async fn forecast_for(&self, city: &str) -> Result<ForecastView> {
        info!("Fetching forecast for '{}'", city);

        let Some(location) = self.geocoder.locate(city).await else {
            return Err(WeatherAppError::not_found(city));
        };

        let Some(forecast) = self
            .forecasts
            .fetch(location.latitude, location.longitude)
            .await
        else {
            warn!("No forecast available for {}", location.name);
            return Err(WeatherAppError::Unavailable);
        };

        ForecastView::assemble(location, forecast)
    }
}
