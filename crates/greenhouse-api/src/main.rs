//! Greenhouse API server entry point.

use std::sync::Arc;

use greenhouse_api::config::{Config, StorageBackend};
use greenhouse_api::error::AppError;
use greenhouse_api::state::AppState;
use greenhouse_core::bus::EventBus;
use greenhouse_core::clock::{Clock, SystemClock};
use greenhouse_store::event_bus::TracingEventBus;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Greenhouse API server");

    let config = Config::from_env()?;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let event_bus: Arc<dyn EventBus> = Arc::new(TracingEventBus);

    let app_state = match (config.storage, config.database_url.as_deref()) {
        (StorageBackend::Postgres, Some(database_url)) => {
            let pool = PgPoolOptions::new()
                .max_connections(config.database_max_connections)
                .connect(database_url)
                .await?;
            sqlx::migrate!("../../migrations").run(&pool).await?;
            tracing::info!("Using PostgreSQL document storage");
            AppState::postgres(pool, clock, event_bus)
        }
        (StorageBackend::Postgres, None) => {
            return Err(AppError::Config(
                "DATABASE_URL must be set when STORAGE_BACKEND is postgres".to_owned(),
            ));
        }
        (StorageBackend::Memory, _) => {
            tracing::warn!("Using in-memory storage; data is lost on restart");
            AppState::in_memory(clock, event_bus)
        }
    };

    if config.cors_allowed_origins.is_empty() {
        tracing::warn!("CORS_ALLOWED_ORIGINS not set; allowing any origin");
    }
    let app = greenhouse_api::build_router(app_state, config.cors_layer());

    let addr = config.socket_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
