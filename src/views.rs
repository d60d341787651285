//! Server-rendered HTML for the search and forecast pages

use std::fmt::Write;

use crate::forecast_service::ForecastView;
use crate::presentation::{NOT_AVAILABLE, round_display};

const TITLE: &str = "Weather App";

/// Escapes text for HTML element content and quoted attributes
#[must_use]
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn measurement(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{}{unit}", round_display(v)),
        None => NOT_AVAILABLE.to_string(),
    }
}

fn layout(title: &str, body: &str, body_attrs: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title}</title>
  <link rel="stylesheet" href="https://fonts.googleapis.com/icon?family=Material+Icons">
  <link rel="stylesheet" href="/static/app.css">
</head>
<body{body_attrs}>
  <main class="container">
{body}
  </main>
  <script src="/static/recent.js"></script>
</body>
</html>
"#,
        title = escape_html(title),
    )
}

fn search_form() -> &'static str {
    r#"    <form class="search" method="post" action="/search/">
      <input type="text" name="city" placeholder="Enter a city name" autofocus>
      <button type="submit"><span class="material-icons">search</span></button>
    </form>"#
}

/// The input page, optionally with a flash message
#[must_use]
pub fn render_index(message: Option<&str>) -> String {
    let mut body = String::new();
    let _ = writeln!(body, "    <h1>{TITLE}</h1>");
    if let Some(message) = message.filter(|m| !m.is_empty()) {
        let _ = writeln!(
            body,
            r#"    <div class="message error" role="alert">{}</div>"#,
            escape_html(message)
        );
    }
    body.push_str(search_form());
    body.push_str("\n    <section id=\"recent-locations\" class=\"recent\"></section>");

    layout(TITLE, &body, "")
}

/// The forecast page for one location
#[must_use]
pub fn render_forecast(view: &ForecastView) -> String {
    let location = &view.location;
    let current = &view.current_weather;
    let place = match &location.country {
        Some(country) => format!("{}, {}", location.name, country),
        None => location.name.clone(),
    };

    let mut body = String::new();
    let _ = writeln!(body, r#"    <a class="back" href="/">&larr; New search</a>"#);
    let _ = writeln!(
        body,
        r#"    <header class="current">
      <h1>{place}</h1>
      <span class="material-icons weather-icon">{icon}</span>
      <div class="temperature">{temperature}</div>
      <div class="description">{description}</div>
    </header>"#,
        place = escape_html(&place),
        icon = escape_html(view.weather_icon),
        temperature = measurement(current.temperature, "°C"),
        description = escape_html(view.weather_info.description),
    );

    let _ = writeln!(
        body,
        r#"    <dl class="details">
      <dt>Feels like</dt><dd>{feels}</dd>
      <dt>Humidity</dt><dd>{humidity}</dd>
      <dt>Pressure</dt><dd>{pressure}</dd>
      <dt>Wind</dt><dd>{wind} {direction}</dd>
      <dt>UV index</dt><dd>{uv}</dd>
      <dt>Timezone</dt><dd>{timezone}</dd>
    </dl>"#,
        feels = measurement(current.apparent_temperature, "°C"),
        humidity = measurement(current.humidity, "%"),
        pressure = measurement(current.pressure, " hPa"),
        wind = measurement(current.wind_speed, " km/h"),
        direction = escape_html(&view.wind_direction_text),
        uv = measurement(current.uv_index, ""),
        timezone = escape_html(&location.timezone),
    );

    body.push_str("    <h2>Next 24 hours</h2>\n    <ol class=\"hourly\">\n");
    for row in &view.hourly_forecast {
        let _ = writeln!(
            body,
            r#"      <li><span class="time">{}</span><span class="material-icons">{}</span><span class="temp">{}°</span><span class="wind">{} km/h</span></li>"#,
            escape_html(&row.time),
            escape_html(row.icon),
            row.temperature,
            row.wind_speed,
        );
    }
    body.push_str("    </ol>\n");

    body.push_str("    <h2>7-day forecast</h2>\n    <ol class=\"daily\">\n");
    for row in &view.daily_forecast {
        let _ = writeln!(
            body,
            r#"      <li><span class="date">{}</span><span class="material-icons">{}</span><span class="temp">{}° / {}°</span><span class="rain">{}</span><span class="wind">{} km/h</span></li>"#,
            escape_html(&row.date),
            escape_html(row.icon),
            row.temp_max,
            row.temp_min,
            escape_html(&row.precipitation_text),
            row.wind_speed,
        );
    }
    body.push_str("    </ol>");

    let attrs = format!(r#" data-location="{}""#, escape_html(&view.location_json));
    layout(&format!("{place} | {TITLE}"), &body, &attrs)
}
