//! Error types and handling for the `CityWeather` application

use thiserror::Error;

/// Generic message shown when something other than a lookup failure goes wrong
pub const GENERIC_USER_MESSAGE: &str = "An error occurred while fetching weather data.";

/// Main error type for the `CityWeather` application
#[derive(Error, Debug)]
pub enum WeatherAppError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// API communication errors
    #[error("API error: {message}")]
    Api { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Geocoding yielded no location for the requested city
    #[error("City not found: {city}")]
    NotFound { city: String },

    /// The forecast could not be fetched
    #[error("Weather data unavailable")]
    Unavailable,

    /// JSON encoding/decoding errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
}

impl WeatherAppError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new not-found error for a city name
    pub fn not_found<S: Into<String>>(city: S) -> Self {
        Self::NotFound { city: city.into() }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            WeatherAppError::Validation { message } => message.clone(),
            WeatherAppError::NotFound { city } => {
                format!("City \"{city}\" not found. Please try again.")
            }
            WeatherAppError::Unavailable => {
                "Unable to fetch weather data. Please try again.".to_string()
            }
            _ => GENERIC_USER_MESSAGE.to_string(),
        }
    }
}

impl From<reqwest::Error> for WeatherAppError {
    fn from(err: reqwest::Error) -> Self {
        WeatherAppError::api(err.to_string())
    }
}

impl From<reqwest_middleware::Error> for WeatherAppError {
    fn from(err: reqwest_middleware::Error) -> Self {
        WeatherAppError::api(err.to_string())
    }
}
