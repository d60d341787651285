use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
};
use serde::Serialize;

use crate::WeatherAppError;
use crate::forecast_service::ForecastView;
use crate::web::AppState;

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct ApiMessage {
    pub message: String,
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

fn api_error(status: StatusCode, error: String) -> (StatusCode, Json<ApiError>) {
    (status, Json(ApiError { error }))
}

impl From<WeatherAppError> for (StatusCode, Json<ApiError>) {
    fn from(err: WeatherAppError) -> Self {
        let status = match err {
            WeatherAppError::Validation { .. } => StatusCode::BAD_REQUEST,
            WeatherAppError::NotFound { .. } => StatusCode::NOT_FOUND,
            WeatherAppError::Unavailable => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        api_error(status, err.user_message())
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/forecast/{city}", get(get_forecast))
        .route(
            "/recent-locations",
            get(get_recent_locations).fallback(method_not_allowed),
        )
}

async fn get_forecast(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> ApiResult<ForecastView> {
    let view = state.service.forecast_for(&city).await?;
    Ok(Json(view))
}

/// Recent locations are kept in the browser; the server only points there.
async fn get_recent_locations() -> Json<ApiMessage> {
    Json(ApiMessage {
        message: "Use localStorage on frontend".to_string(),
    })
}

async fn method_not_allowed() -> (StatusCode, Json<ApiError>) {
    api_error(
        StatusCode::METHOD_NOT_ALLOWED,
        "Method not allowed".to_string(),
    )
}
