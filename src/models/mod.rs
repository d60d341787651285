//! Data models for the CityWeather application
//!
//! This module contains the core domain models organized by concern:
//! - Location: Geocoded place and its browser-storage form
//! - Weather: Provider forecast records and display rows

pub mod location;
pub mod weather;

// Re-export all public types for convenient access
pub use location::{Location, StoredLocation};
pub use weather::{
    CurrentConditions, DailyForecastRow, DailySeries, ForecastResponse, HourlyForecastRow,
    HourlySeries, SeriesValues, WeatherCodeInfo, weather_code_from_json,
};
