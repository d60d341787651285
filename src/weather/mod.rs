//! Outbound weather integrations: geocoding, forecasts and the weather code table

pub mod codes;
pub mod geocoding;
pub mod open_meteo;

pub use codes::{weather_icon, weather_info};
pub use geocoding::GeocodingClient;
pub use open_meteo::{ForecastCache, ForecastClient};

pub(crate) const USER_AGENT: &str = concat!("CityWeather/", env!("CARGO_PKG_VERSION"));
