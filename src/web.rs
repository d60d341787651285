use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::forecast_service::ForecastService;
use crate::{api, pages};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ForecastService>,
}

impl AppState {
    pub fn new(service: ForecastService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

/// HTML pages at the root, JSON under `/api`, assets under `/static`
pub fn router(state: AppState, static_dir: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    pages::router()
        .nest("/api", api::router())
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: &AppConfig, state: AppState) -> anyhow::Result<()> {
    let app = router(state, &config.server.static_dir);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Web server running at http://{}", addr);

    axum::serve(listener, app).await.context("Web server failed")?;
    Ok(())
}
