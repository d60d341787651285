//! Turns provider forecast data into display rows
//!
//! Every function here is total: missing or short series never fail the
//! whole batch. A value past the end of a shorter series is read as zero, while
//! an item with a missing series, a null or mistyped value, or an unreadable
//! timestamp is skipped on its own.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::models::{
    DailyForecastRow, DailySeries, HourlyForecastRow, HourlySeries, weather_code_from_json,
};
use crate::weather::weather_icon;

pub const MAX_HOURLY_ROWS: usize = 24;
pub const MAX_DAILY_ROWS: usize = 7;

/// Shown when the wind direction is unknown
pub const NOT_AVAILABLE: &str = "N/A";

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Why a single forecast item could not be turned into a row
#[derive(Error, Debug, PartialEq)]
enum RowError {
    #[error("series '{0}' is missing")]
    MissingSeries(&'static str),

    #[error("null value in '{0}'")]
    NullValue(&'static str),

    #[error("value of the wrong type in '{0}'")]
    WrongType(&'static str),

    #[error("unreadable timestamp '{0}'")]
    BadTimestamp(String),
}

/// Entry at `index`, `None` past the end of a short series
fn entry_at<'a>(
    series: Option<&'a [Value]>,
    name: &'static str,
    index: usize,
) -> Result<Option<&'a Value>, RowError> {
    let values = series.ok_or(RowError::MissingSeries(name))?;
    match values.get(index) {
        Some(Value::Null) => Err(RowError::NullValue(name)),
        entry => Ok(entry),
    }
}

/// Number at `index`, zero past the end of a short series
fn number_at(series: Option<&[Value]>, name: &'static str, index: usize) -> Result<f64, RowError> {
    match entry_at(series, name, index)? {
        None => Ok(0.0),
        Some(value) => value.as_f64().ok_or(RowError::WrongType(name)),
    }
}

/// Weather code at `index`, code 0 past the end of a short series
fn code_at(series: Option<&[Value]>, name: &'static str, index: usize) -> Result<i32, RowError> {
    match entry_at(series, name, index)? {
        None => Ok(0),
        Some(value) => weather_code_from_json(value).ok_or(RowError::WrongType(name)),
    }
}

fn label_at(times: &[Value], index: usize) -> Result<&str, RowError> {
    match times.get(index) {
        None | Some(Value::Null) => Err(RowError::NullValue("time")),
        Some(value) => value.as_str().ok_or(RowError::WrongType("time")),
    }
}

/// Rounds half to even
pub(crate) fn round_display(value: f64) -> i64 {
    value.round_ties_even() as i64
}

/// Parses an ISO-8601 timestamp and returns its wall-clock time.
/// A trailing `Z` is read as `+00:00`.
fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, RowError> {
    let normalized = match raw.strip_suffix('Z') {
        Some(rest) => format!("{rest}+00:00"),
        None => raw.to_string(),
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalized) {
        return Ok(dt.naive_local());
    }
    if let Ok(dt) = DateTime::parse_from_str(&normalized, "%Y-%m-%dT%H:%M%:z") {
        return Ok(dt.naive_local());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(&normalized, format) {
            return Ok(dt);
        }
    }
    NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| RowError::BadTimestamp(raw.to_string()))
}

/// Renders wind direction as `"<degrees>° (<compass point>)"`.
#[must_use]
pub fn format_wind_direction(degrees: Option<f64>) -> String {
    let Some(degrees) = degrees.filter(|d| d.is_finite()) else {
        return NOT_AVAILABLE.to_string();
    };

    let index = (degrees / 22.5).round_ties_even().rem_euclid(16.0) as usize;
    format!("{}\u{00B0} ({})", degrees, COMPASS_POINTS[index])
}

/// Builds up to 24 hourly rows
#[must_use]
pub fn process_hourly_forecast(hourly: Option<&HourlySeries>) -> Vec<HourlyForecastRow> {
    let Some(hourly) = hourly else {
        return Vec::new();
    };
    let Some(times) = hourly.time.as_deref() else {
        return Vec::new();
    };

    (0..times.len().min(MAX_HOURLY_ROWS))
        .filter_map(|i| match hourly_row(hourly, times, i) {
            Ok(row) => Some(row),
            Err(e) => {
                debug!("Skipping hourly item {}: {}", i, e);
                None
            }
        })
        .collect()
}

fn hourly_row(
    hourly: &HourlySeries,
    times: &[Value],
    index: usize,
) -> Result<HourlyForecastRow, RowError> {
    let timestamp = parse_timestamp(label_at(times, index)?)?;
    let temperature = number_at(hourly.temperature.as_deref(), "temperature_2m", index)?;
    let weather_code = code_at(hourly.weather_code.as_deref(), "weather_code", index)?;
    let wind_speed = number_at(hourly.wind_speed.as_deref(), "wind_speed_10m", index)?;

    Ok(HourlyForecastRow {
        time: timestamp.format("%H:%M").to_string(),
        temperature: round_display(temperature),
        weather_code,
        wind_speed: round_display(wind_speed),
        icon: weather_icon(weather_code),
    })
}

/// Builds up to 7 daily rows
#[must_use]
pub fn process_daily_forecast(daily: Option<&DailySeries>) -> Vec<DailyForecastRow> {
    let Some(daily) = daily else {
        return Vec::new();
    };
    let Some(times) = daily.time.as_deref() else {
        return Vec::new();
    };

    (0..times.len().min(MAX_DAILY_ROWS))
        .filter_map(|i| match daily_row(daily, times, i) {
            Ok(row) => Some(row),
            Err(e) => {
                debug!("Skipping daily item {}: {}", i, e);
                None
            }
        })
        .collect()
}

fn day_label(times: &[Value], index: usize) -> Result<String, RowError> {
    match index {
        0 => Ok("Today".to_string()),
        1 => Ok("Tomorrow".to_string()),
        _ => {
            let raw = label_at(times, index)?;
            let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .or_else(|_| parse_timestamp(raw).map(|dt| dt.date()))?;
            Ok(date.format("%m/%d").to_string())
        }
    }
}

fn daily_row(
    daily: &DailySeries,
    times: &[Value],
    index: usize,
) -> Result<DailyForecastRow, RowError> {
    let date = day_label(times, index)?;
    let precipitation = number_at(daily.precipitation.as_deref(), "precipitation_sum", index)?;
    let temp_max = number_at(daily.temperature_max.as_deref(), "temperature_2m_max", index)?;
    let temp_min = number_at(daily.temperature_min.as_deref(), "temperature_2m_min", index)?;
    let weather_code = code_at(daily.weather_code.as_deref(), "weather_code", index)?;
    let wind_speed = number_at(daily.wind_speed_max.as_deref(), "wind_speed_10m_max", index)?;

    Ok(DailyForecastRow {
        date,
        temp_max: round_display(temp_max),
        temp_min: round_display(temp_min),
        weather_code,
        precipitation,
        wind_speed: round_display(wind_speed),
        icon: weather_icon(weather_code),
        precipitation_text: precipitation_text(precipitation),
    })
}

/// `"No rain"` for zero or less, otherwise e.g. `"2.0mm"`
#[must_use]
pub fn precipitation_text(precipitation: f64) -> String {
    if precipitation <= 0.0 {
        "No rain".to_string()
    } else {
        format!("{precipitation:.1}mm")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn hourly_series(count: usize) -> HourlySeries {
        HourlySeries {
            time: Some(
                (0..count)
                    .map(|i| json!(format!("2024-06-{:02}T{:02}:00", 1 + i / 24, i % 24)))
                    .collect(),
            ),
            temperature: Some((0..count).map(|i| json!(10.0 + i as f64 * 0.4)).collect()),
            weather_code: Some(vec![json!(2); count]),
            wind_speed: Some(vec![json!(12.6); count]),
        }
    }

    fn daily_series(precipitation: Vec<Value>) -> DailySeries {
        let count = precipitation.len();
        DailySeries {
            time: Some(
                (0..count)
                    .map(|i| json!(format!("2024-06-{:02}", 1 + i)))
                    .collect(),
            ),
            temperature_max: Some(vec![json!(22.4); count]),
            temperature_min: Some(vec![json!(11.6); count]),
            weather_code: Some(vec![json!(61); count]),
            precipitation: Some(precipitation),
            wind_speed_max: Some(vec![json!(18.2); count]),
        }
    }

    #[rstest]
    #[case(0.0, "0° (N)")]
    #[case(90.0, "90° (E)")]
    #[case(180.0, "180° (S)")]
    #[case(270.0, "270° (W)")]
    #[case(360.0, "360° (N)")]
    #[case(45.0, "45° (NE)")]
    #[case(247.5, "247.5° (WSW)")]
    #[case(350.0, "350° (N)")]
    fn wind_direction_maps_to_compass(#[case] degrees: f64, #[case] expected: &str) {
        assert_eq!(format_wind_direction(Some(degrees)), expected);
    }

    #[test]
    fn wind_direction_absent_is_not_available() {
        assert_eq!(format_wind_direction(None), "N/A");
    }

    #[test]
    fn wind_direction_uses_degree_sign() {
        assert!(format_wind_direction(Some(10.0)).contains('\u{00B0}'));
    }

    #[test]
    fn hourly_is_capped_at_24_rows() {
        let rows = process_hourly_forecast(Some(&hourly_series(30)));
        assert_eq!(rows.len(), 24);
        assert_eq!(rows[0].time, "00:00");
        assert_eq!(rows[23].time, "23:00");
    }

    #[test]
    fn hourly_row_values_are_rounded() {
        let rows = process_hourly_forecast(Some(&hourly_series(2)));
        assert_eq!(rows[0].temperature, 10);
        assert_eq!(rows[0].wind_speed, 13);
        assert_eq!(rows[0].weather_code, 2);
        assert_eq!(rows[0].icon, "partly_cloudy_day");
    }

    #[test]
    fn hourly_skips_malformed_timestamp_only() {
        let mut series = hourly_series(5);
        if let Some(times) = series.time.as_mut() {
            times[2] = json!("not-a-time");
        }

        let rows = process_hourly_forecast(Some(&series));

        assert_eq!(rows.len(), 4);
        let labels: Vec<_> = rows.iter().map(|r| r.time.as_str()).collect();
        assert_eq!(labels, ["00:00", "01:00", "03:00", "04:00"]);
    }

    #[test]
    fn hourly_accepts_zulu_and_offset_timestamps() {
        let series = HourlySeries {
            time: Some(vec![
                json!("2024-06-01T13:45Z"),
                json!("2024-06-01T08:15:00+02:00"),
                json!("2024-06-01"),
            ]),
            temperature: Some(vec![json!(1.0); 3]),
            weather_code: Some(vec![json!(0); 3]),
            wind_speed: Some(vec![json!(1.0); 3]),
        };

        let rows = process_hourly_forecast(Some(&series));
        let labels: Vec<_> = rows.iter().map(|r| r.time.as_str()).collect();
        assert_eq!(labels, ["13:45", "08:15", "00:00"]);
    }

    #[test]
    fn hourly_short_series_substitute_zero() {
        let mut series = hourly_series(3);
        series.temperature = Some(vec![json!(20.2)]);
        series.weather_code = Some(vec![json!(95)]);

        let rows = process_hourly_forecast(Some(&series));

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].temperature, 0);
        assert_eq!(rows[1].weather_code, 0);
        assert_eq!(rows[1].icon, "wb_sunny");
        assert_eq!(rows[0].icon, "thunderstorm");
    }

    #[test]
    fn hourly_null_value_skips_item() {
        let mut series = hourly_series(3);
        series.temperature = Some(vec![json!(20.0), Value::Null, json!(18.0)]);

        let rows = process_hourly_forecast(Some(&series));
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn hourly_wrong_type_skips_item() {
        let mut series = hourly_series(3);
        series.temperature = Some(vec![json!(14.1), json!("oops"), json!(13.0)]);

        let rows = process_hourly_forecast(Some(&series));

        let labels: Vec<_> = rows.iter().map(|r| r.time.as_str()).collect();
        assert_eq!(labels, ["00:00", "02:00"]);
        assert_eq!(rows[1].temperature, 13);
    }

    #[test]
    fn hourly_codes_accept_integral_floats() {
        let mut series = hourly_series(3);
        series.weather_code = Some(vec![json!(3.0), json!(2.5), json!([95])]);

        let rows = process_hourly_forecast(Some(&series));

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].weather_code, 3);
        assert_eq!(rows[0].icon, "cloud");
    }

    #[test]
    fn hourly_non_string_timestamp_skips_item() {
        let mut series = hourly_series(2);
        if let Some(times) = series.time.as_mut() {
            times[0] = json!(1717200000);
        }

        let rows = process_hourly_forecast(Some(&series));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].time, "01:00");
    }

    #[test]
    fn hourly_missing_series_yields_nothing() {
        let mut series = hourly_series(3);
        series.wind_speed = None;
        assert!(process_hourly_forecast(Some(&series)).is_empty());
    }

    #[test]
    fn hourly_without_time_is_empty() {
        assert!(process_hourly_forecast(None).is_empty());
        assert!(process_hourly_forecast(Some(&HourlySeries::default())).is_empty());
    }

    #[test]
    fn rounding_is_half_to_even() {
        assert_eq!(round_display(2.5), 2);
        assert_eq!(round_display(3.5), 4);
        assert_eq!(round_display(-0.4), 0);
    }

    #[test]
    fn daily_labels_today_tomorrow_then_dates() {
        let rows = process_daily_forecast(Some(&daily_series(vec![json!(0.0); 7])));
        let labels: Vec<_> = rows.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(
            labels,
            ["Today", "Tomorrow", "06/03", "06/04", "06/05", "06/06", "06/07"]
        );
    }

    #[test]
    fn daily_first_row_is_today_regardless_of_date() {
        let mut series = daily_series(vec![json!(0.0); 3]);
        if let Some(times) = series.time.as_mut() {
            times[0] = json!("garbage");
        }

        let rows = process_daily_forecast(Some(&series));
        assert_eq!(rows[0].date, "Today");
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn daily_is_capped_at_seven_rows() {
        let rows = process_daily_forecast(Some(&daily_series(vec![json!(1.0); 10])));
        assert_eq!(rows.len(), 7);
    }

    #[test]
    fn daily_precipitation_text() {
        let rows =
            process_daily_forecast(Some(&daily_series(vec![json!(0.0), json!(2.0), json!(0.26)])));
        assert_eq!(rows[0].precipitation_text, "No rain");
        assert_eq!(rows[1].precipitation_text, "2.0mm");
        assert_eq!(rows[1].precipitation, 2.0);
        assert_eq!(rows[2].precipitation_text, "0.3mm");
    }

    #[test]
    fn daily_row_values() {
        let rows = process_daily_forecast(Some(&daily_series(vec![json!(0)])));
        let row = &rows[0];
        assert_eq!(row.temp_max, 22);
        assert_eq!(row.temp_min, 12);
        assert_eq!(row.wind_speed, 18);
        assert_eq!(row.weather_code, 61);
        assert_eq!(row.icon, "rainy");
        assert_eq!(row.precipitation_text, "No rain");
    }

    #[test]
    fn daily_malformed_later_date_is_skipped() {
        let mut series = daily_series(vec![json!(0.0); 4]);
        if let Some(times) = series.time.as_mut() {
            times[2] = json!("06/03/2024");
        }

        let rows = process_daily_forecast(Some(&series));
        let labels: Vec<_> = rows.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(labels, ["Today", "Tomorrow", "06/04"]);
    }

    #[test]
    fn daily_null_precipitation_skips_item() {
        let rows =
            process_daily_forecast(Some(&daily_series(vec![json!(0.0), Value::Null, json!(1.0)])));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].date, "06/03");
    }

    #[test]
    fn daily_wrong_type_skips_item() {
        let mut series = daily_series(vec![json!(0.0); 3]);
        series.temperature_max = Some(vec![json!(22.4), json!(true), json!(20.0)]);

        let rows = process_daily_forecast(Some(&series));

        let labels: Vec<_> = rows.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(labels, ["Today", "06/03"]);
    }

    #[test]
    fn precipitation_negative_is_no_rain() {
        assert_eq!(precipitation_text(-0.1), "No rain");
    }
}
