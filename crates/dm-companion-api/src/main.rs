//! DM Companion API server entry point.

use std::sync::Arc;

use axum::Router;
use dm_companion_core::clock::SystemClock;
use dm_companion_store::SqliteStore;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use dm_companion_api::config::Configuration;
use dm_companion_api::error::AppError;
use dm_companion_api::routes;
use dm_companion_api::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = Configuration::from_env()?;

    // Initialize tracing subscriber.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if config.development {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .pretty()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    }

    tracing::info!("Starting DM Companion API server");

    let store = Arc::new(SqliteStore::connect(&config.database_url).await?);
    tracing::info!(database_url = %config.database_url, "store ready");

    let app_state = AppState::new(Arc::new(SystemClock), store.clone(), store);

    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    let app = Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/characters", routes::character::router())
        .nest("/api/v1/encounters", routes::encounter::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    let addr = config.socket_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
