use axum::{
    Form, Router,
    extract::{Path, Query, State, rejection::FormRejection},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use serde::Deserialize;

use crate::WeatherAppError;
use crate::forecast_service::validate_city_name;
use crate::views;
use crate::web::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct IndexParams {
    pub message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub city: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/search/", get(search_page).post(search))
        .route("/forecast/{city}/", get(forecast))
}

/// Redirect back to the input page carrying `message`
fn redirect_with_message(message: &str) -> Response {
    Redirect::to(&format!("/?message={}", urlencoding::encode(message))).into_response()
}

fn failure(error: &WeatherAppError) -> Response {
    match error {
        WeatherAppError::NotFound { .. } | WeatherAppError::Unavailable => {
            tracing::info!("Forecast lookup failed: {}", error);
        }
        _ => tracing::error!("Unexpected error while building forecast: {}", error),
    }
    redirect_with_message(&error.user_message())
}

async fn index(Query(params): Query<IndexParams>) -> Html<String> {
    Html(views::render_index(params.message.as_deref()))
}

async fn search_page() -> Html<String> {
    Html(views::render_index(None))
}

async fn search(
    State(state): State<AppState>,
    form: Result<Form<SearchForm>, FormRejection>,
) -> Response {
    // An unreadable body is treated as an empty city
    let form = form.map(|Form(form)| form).unwrap_or_else(|rejection| {
        tracing::debug!("Unreadable search form: {}", rejection);
        SearchForm::default()
    });

    let city = match validate_city_name(&form.city) {
        Ok(city) => city,
        Err(e) => return Html(views::render_index(Some(&e.user_message()))).into_response(),
    };

    match state.service.forecast_for(city).await {
        Ok(view) => Html(views::render_forecast(&view)).into_response(),
        Err(e) => failure(&e),
    }
}

async fn forecast(State(state): State<AppState>, Path(city): Path<String>) -> Response {
    match state.service.forecast_for(&city).await {
        Ok(view) => Html(views::render_forecast(&view)).into_response(),
        Err(e) => failure(&e),
    }
}
