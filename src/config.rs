//! Configuration management for the `CityWeather` application
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::WeatherAppError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "CITYWEATHER_CONFIG";

/// Root configuration structure for the `CityWeather` application
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Outbound weather API configuration
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Forecast response cache configuration
    #[serde(default)]
    pub cache: CacheConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default = "default_server_host")]
    pub host: String,
    /// Port to listen on
    #[serde(default = "default_server_port")]
    pub port: u16,
    /// Directory served under `/static`
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

/// Weather API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Geocoding search endpoint
    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,
    /// Forecast endpoint
    #[serde(default = "default_forecast_url")]
    pub forecast_url: String,
    /// Per-call request timeout in seconds
    #[serde(default = "default_weather_timeout")]
    pub timeout_seconds: u32,
    /// Retries for transient forecast failures
    #[serde(default = "default_weather_max_retries")]
    pub max_retries: u32,
}

/// Cache configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Whether forecast responses are cached at all
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,
    /// Cache TTL in seconds
    #[serde(default = "default_cache_ttl")]
    pub ttl_seconds: u64,
    /// Cache directory location
    #[serde(default = "default_cache_location")]
    pub location: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    8000
}

fn default_static_dir() -> String {
    "static".to_string()
}

fn default_geocoding_url() -> String {
    "https://geocoding-api.open-meteo.com/v1/search".to_string()
}

fn default_forecast_url() -> String {
    "https://api.open-meteo.com/v1/forecast".to_string()
}

fn default_weather_timeout() -> u32 {
    10
}

fn default_weather_max_retries() -> u32 {
    5
}

fn default_cache_enabled() -> bool {
    true
}

fn default_cache_ttl() -> u64 {
    3600
}

fn default_cache_location() -> String {
    dirs::cache_dir()
        .map(|dir| dir.join("cityweather"))
        .unwrap_or_else(|| PathBuf::from(".cache"))
        .to_string_lossy()
        .into_owned()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            static_dir: default_static_dir(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            geocoding_url: default_geocoding_url(),
            forecast_url: default_forecast_url(),
            timeout_seconds: default_weather_timeout(),
            max_retries: default_weather_max_retries(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_cache_enabled(),
            ttl_seconds: default_cache_ttl(),
            location: default_cache_location(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl WeatherConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.into())
    }
}

impl CacheConfig {
    #[must_use]
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }
}

impl AppConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        let explicit = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
        Self::load_from_path(explicit)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment overrides, e.g. CITYWEATHER_SERVER__PORT=9000
        builder = builder.add_source(
            Environment::with_prefix("CITYWEATHER")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: AppConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("cityweather").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.server.host.is_empty() {
            self.server.host = default_server_host();
        }
        if self.server.port == 0 {
            self.server.port = default_server_port();
        }
        if self.server.static_dir.is_empty() {
            self.server.static_dir = default_static_dir();
        }
        if self.weather.geocoding_url.is_empty() {
            self.weather.geocoding_url = default_geocoding_url();
        }
        if self.weather.forecast_url.is_empty() {
            self.weather.forecast_url = default_forecast_url();
        }
        if self.weather.timeout_seconds == 0 {
            self.weather.timeout_seconds = default_weather_timeout();
        }
        if self.cache.ttl_seconds == 0 {
            self.cache.ttl_seconds = default_cache_ttl();
        }
        if self.cache.location.is_empty() {
            self.cache.location = default_cache_location();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.weather.timeout_seconds > 300 {
            return Err(
                WeatherAppError::config("Weather API timeout cannot exceed 300 seconds").into(),
            );
        }

        if self.weather.max_retries > 10 {
            return Err(WeatherAppError::config("Weather API max retries cannot exceed 10").into());
        }

        if self.cache.ttl_seconds > 7 * 24 * 60 * 60 {
            return Err(
                WeatherAppError::config("Cache TTL cannot exceed 604800 seconds (1 week)").into(),
            );
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(WeatherAppError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(WeatherAppError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for (name, url) in [
            ("Geocoding", &self.weather.geocoding_url),
            ("Forecast", &self.weather.forecast_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(WeatherAppError::config(format!(
                    "{name} API URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }

    /// Socket address the server binds to
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(
            config.weather.forecast_url,
            "https://api.open-meteo.com/v1/forecast"
        );
        assert_eq!(config.weather.timeout_seconds, 10);
        assert_eq!(config.weather.max_retries, 5);
        assert_eq!(config.cache.ttl_seconds, 3600);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.server.port, 8000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = AppConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = AppConfig::default();
        config.weather.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout cannot exceed"));
    }

    #[test]
    fn test_config_validation_rejects_non_http_url() {
        let mut config = AppConfig::default();
        config.weather.geocoding_url = "ftp://example.com".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Geocoding API URL"));
    }

    #[test]
    fn test_apply_defaults_fills_empty_values() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        config.logging.format = String::new();
        config.apply_defaults();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[server]\nport = 9100\n\n[cache]\nenabled = false\n\n[logging]\nformat = \"json\""
        )
        .unwrap();

        let config = AppConfig::load_from_path(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.server.port, 9100);
        assert!(!config.cache.enabled);
        assert_eq!(config.logging.format, "json");
        // untouched sections keep their defaults
        assert_eq!(config.weather.timeout_seconds, 10);
    }

    #[test]
    fn test_config_path_generation() {
        if let Some(path) = AppConfig::get_config_path() {
            assert!(path.to_string_lossy().contains("cityweather"));
            assert!(path.to_string_lossy().contains("config.toml"));
        }
    }
}
