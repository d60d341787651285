//! WMO weather code lookup

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::models::WeatherCodeInfo;

/// Code used when the provider sends something we do not know
pub const FALLBACK_CODE: i32 = 0;

static WEATHER_CODES: LazyLock<HashMap<i32, WeatherCodeInfo>> = LazyLock::new(|| {
    let entry = |description, icon| WeatherCodeInfo { description, icon };
    HashMap::from([
        (0, entry("Clear sky", "wb_sunny")),
        (1, entry("Mainly clear", "wb_sunny")),
        (2, entry("Partly cloudy", "partly_cloudy_day")),
        (3, entry("Overcast", "cloud")),
        (45, entry("Fog", "foggy")),
        (48, entry("Depositing rime fog", "foggy")),
        (51, entry("Light drizzle", "grain")),
        (53, entry("Moderate drizzle", "grain")),
        (55, entry("Dense drizzle", "grain")),
        (61, entry("Slight rain", "rainy")),
        (63, entry("Moderate rain", "rainy")),
        (65, entry("Heavy rain", "rainy")),
        (71, entry("Slight snow", "ac_unit")),
        (73, entry("Moderate snow", "ac_unit")),
        (75, entry("Heavy snow", "ac_unit")),
        (80, entry("Slight rain showers", "rainy")),
        (81, entry("Moderate rain showers", "rainy")),
        (82, entry("Violent rain showers", "rainy")),
        (95, entry("Thunderstorm", "thunderstorm")),
        (96, entry("Thunderstorm with hail", "thunderstorm")),
        (99, entry("Thunderstorm with heavy hail", "thunderstorm")),
    ])
});

/// Description and icon for a weather code; unknown codes map to clear sky.
#[must_use]
pub fn weather_info(code: i32) -> WeatherCodeInfo {
    WEATHER_CODES
        .get(&code)
        .or_else(|| WEATHER_CODES.get(&FALLBACK_CODE))
        .copied()
        .unwrap_or(WeatherCodeInfo {
            description: "Clear sky",
            icon: "wb_sunny",
        })
}

/// Material icon name for a weather code
#[must_use]
pub fn weather_icon(code: i32) -> &'static str {
    weather_info(code).icon
}
