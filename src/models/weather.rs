//! Forecast data as returned by the provider and as shown to the user

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Raw series entries. Items are typed when a row is built, so one bad entry
/// only costs its own row.
pub type SeriesValues = Vec<Value>;

/// Reads a WMO code sent as an integer or an integral float (`3` or `3.0`)
#[must_use]
pub fn weather_code_from_json(value: &Value) -> Option<i32> {
    if let Some(code) = value.as_i64() {
        return i32::try_from(code).ok();
    }
    let code = value.as_f64()?;
    let in_range = (f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(&code);
    (code.fract() == 0.0 && in_range).then_some(code as i32)
}

/// Unreadable codes become `None`, which falls back to code 0
fn lenient_weather_code<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(weather_code_from_json))
}

/// Snapshot of current conditions. Any field may be missing upstream.
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
pub struct CurrentConditions {
    pub time: Option<String>,
    /// Temperature in Celsius
    #[serde(rename = "temperature_2m")]
    pub temperature: Option<f64>,
    /// Felt temperature in Celsius
    pub apparent_temperature: Option<f64>,
    /// Relative humidity in percent
    #[serde(rename = "relative_humidity_2m")]
    pub humidity: Option<f64>,
    #[serde(default, deserialize_with = "lenient_weather_code")]
    pub weather_code: Option<i32>,
    /// Surface pressure in hPa
    #[serde(rename = "surface_pressure")]
    pub pressure: Option<f64>,
    /// Wind speed in km/h
    #[serde(rename = "wind_speed_10m")]
    pub wind_speed: Option<f64>,
    /// Wind direction in degrees (0-360, where 0/360 is North)
    #[serde(rename = "wind_direction_10m")]
    pub wind_direction: Option<f64>,
    pub uv_index: Option<f64>,
}

/// Parallel hourly arrays, indexed by `time`
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
pub struct HourlySeries {
    pub time: Option<SeriesValues>,
    #[serde(rename = "temperature_2m")]
    pub temperature: Option<SeriesValues>,
    pub weather_code: Option<SeriesValues>,
    #[serde(rename = "wind_speed_10m")]
    pub wind_speed: Option<SeriesValues>,
}

/// Parallel daily arrays, indexed by `time`
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
pub struct DailySeries {
    pub time: Option<SeriesValues>,
    #[serde(rename = "temperature_2m_max")]
    pub temperature_max: Option<SeriesValues>,
    #[serde(rename = "temperature_2m_min")]
    pub temperature_min: Option<SeriesValues>,
    pub weather_code: Option<SeriesValues>,
    #[serde(rename = "precipitation_sum")]
    pub precipitation: Option<SeriesValues>,
    #[serde(rename = "wind_speed_10m_max")]
    pub wind_speed_max: Option<SeriesValues>,
}

/// Forecast response from the provider
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
pub struct ForecastResponse {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub timezone: Option<String>,
    pub current: Option<CurrentConditions>,
    pub hourly: Option<HourlySeries>,
    pub daily: Option<DailySeries>,
}

/// Description and icon for a weather code
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct WeatherCodeInfo {
    pub description: &'static str,
    pub icon: &'static str,
}

/// One display row of the hourly forecast
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct HourlyForecastRow {
    /// 24-hour `HH:MM`
    pub time: String,
    pub temperature: i64,
    pub weather_code: i32,
    pub wind_speed: i64,
    pub icon: &'static str,
}

/// One display row of the daily forecast
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct DailyForecastRow {
    /// `Today`, `Tomorrow`, or `MM/DD`
    pub date: String,
    pub temp_max: i64,
    pub temp_min: i64,
    pub weather_code: i32,
    /// Precipitation sum in mm
    pub precipitation: f64,
    pub wind_speed: i64,
    pub icon: &'static str,
    pub precipitation_text: String,
}
