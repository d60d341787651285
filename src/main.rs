use std::sync::Arc;

use cityweather::{AppConfig, AppState, ForecastService, PersistentCache, telemetry, web};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    telemetry::init(&config.logging)?;

    let cache = if config.cache.enabled {
        match PersistentCache::open(&config.cache.location) {
            Ok(cache) => Some(Arc::new(cache)),
            Err(e) => {
                tracing::warn!(
                    "Could not open cache at {}, continuing without it: {}",
                    config.cache.location,
                    e
                );
                None
            }
        }
    } else {
        None
    };

    let service = ForecastService::from_config(&config, cache)?;
    web::run(&config, AppState::new(service)).await
}
