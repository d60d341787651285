//! `CityWeather` - City weather lookup web application
//!
//! This library resolves a city name to coordinates, fetches current,
//! hourly and daily conditions from Open-Meteo and renders them as HTML
//! pages and a small JSON API.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod forecast_service;
pub mod models;
pub mod pages;
pub mod presentation;
pub mod telemetry;
pub mod views;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use cache::PersistentCache;
pub use config::AppConfig;
pub use error::WeatherAppError;
pub use forecast_service::{ForecastService, ForecastView};
pub use models::{DailyForecastRow, ForecastResponse, HourlyForecastRow, Location};
pub use weather::{ForecastClient, GeocodingClient};
pub use web::AppState;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, WeatherAppError>;
