//! Greenhouse API — axum HTTP surface over the growing-unit and
//! plant-species contexts.

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Builds the full application router behind the given CORS policy.
#[must_use]
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/growing-units", routes::growing_units::router())
        .nest("/api/v1/plant-species", routes::plant_species::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
