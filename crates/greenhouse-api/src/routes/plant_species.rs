//! Routes for the Plant Species bounded context.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use greenhouse_core::criteria::{Criteria, CriteriaRequest};
use greenhouse_core::pagination::PaginatedResult;
use greenhouse_plant_species::application::{command_handlers, query_handlers};
use greenhouse_plant_species::domain::aggregates::PlantSpeciesPrimitives;
use greenhouse_plant_species::domain::commands;
use greenhouse_plant_species::domain::value_objects::RangePrimitives;
use serde::{Deserialize, Deserializer};
use tracing::instrument;
use uuid::Uuid;

use crate::error::ApiError;
use crate::extract::{CorrelationId, Tenant};
use crate::routes::CommandResponse;
use crate::state::AppState;

/// Request body for POST /.
#[derive(Debug, Deserialize)]
pub struct CreatePlantSpeciesRequest {
    /// Everyday name.
    pub common_name: String,
    /// Binomial name.
    pub scientific_name: String,
    /// Botanical family.
    pub family: Option<String>,
    /// Category, e.g. `HERB`.
    pub category: String,
    /// Care difficulty; defaults to `MEDIUM`.
    pub difficulty: Option<String>,
    /// Growth rate; defaults to `MEDIUM`.
    pub growth_rate: Option<String>,
    /// Preferred temperature range in degrees Celsius.
    pub temperature_range: Option<RangePrimitives>,
    /// Preferred soil pH range.
    pub ph_range: Option<RangePrimitives>,
    /// Days from planting to harvest.
    pub days_to_harvest: Option<i64>,
}

/// Request body for PATCH /{id}. Absent fields are left unchanged; an
/// explicit `null` clears an optional field.
#[derive(Debug, Default, Deserialize)]
pub struct UpdatePlantSpeciesRequest {
    pub common_name: Option<String>,
    pub scientific_name: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub family: Option<Option<String>>,
    pub category: Option<String>,
    pub difficulty: Option<String>,
    pub growth_rate: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub temperature_range: Option<Option<RangePrimitives>>,
    #[serde(default, deserialize_with = "present")]
    pub ph_range: Option<Option<RangePrimitives>>,
    #[serde(default, deserialize_with = "present")]
    pub days_to_harvest: Option<Option<i64>>,
}

/// Marks a field that appeared in the body, `null` included.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// POST /
#[instrument(skip(state, request), fields(tenant_id = %tenant.as_uuid()))]
async fn create_plant_species(
    State(state): State<AppState>,
    Tenant(tenant): Tenant,
    CorrelationId(correlation_id): CorrelationId,
    Json(request): Json<CreatePlantSpeciesRequest>,
) -> Result<(StatusCode, Json<CommandResponse>), ApiError> {
    let command = commands::CreatePlantSpecies {
        correlation_id,
        tenant_id: tenant,
        common_name: request.common_name,
        scientific_name: request.scientific_name,
        family: request.family,
        category: request.category,
        difficulty: request.difficulty,
        growth_rate: request.growth_rate,
        temperature_range: request.temperature_range,
        ph_range: request.ph_range,
        days_to_harvest: request.days_to_harvest,
    };

    let outcome = command_handlers::handle_create_plant_species(
        &command,
        state.clock.as_ref(),
        &*state.plant_species,
        &*state.event_bus,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(outcome.into())))
}

/// GET /{id}
#[instrument(skip(state), fields(tenant_id = %tenant.as_uuid()))]
async fn get_plant_species(
    State(state): State<AppState>,
    Tenant(tenant): Tenant,
    Path(id): Path<Uuid>,
) -> Result<Json<PlantSpeciesPrimitives>, ApiError> {
    let species =
        query_handlers::get_plant_species_by_id(tenant, id, &*state.plant_species_views).await?;
    Ok(Json(species))
}

/// PATCH /{id}
#[instrument(skip(state, request), fields(tenant_id = %tenant.as_uuid()))]
async fn update_plant_species(
    State(state): State<AppState>,
    Tenant(tenant): Tenant,
    CorrelationId(correlation_id): CorrelationId,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdatePlantSpeciesRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let command = commands::UpdatePlantSpecies {
        correlation_id,
        tenant_id: tenant,
        species_id: id,
        common_name: request.common_name,
        scientific_name: request.scientific_name,
        family: request.family,
        category: request.category,
        difficulty: request.difficulty,
        growth_rate: request.growth_rate,
        temperature_range: request.temperature_range,
        ph_range: request.ph_range,
        days_to_harvest: request.days_to_harvest,
    };

    let outcome = command_handlers::handle_update_plant_species(
        &command,
        state.clock.as_ref(),
        &*state.plant_species,
        &*state.event_bus,
    )
    .await?;

    Ok(Json(outcome.into()))
}

/// DELETE /{id}
#[instrument(skip(state), fields(tenant_id = %tenant.as_uuid()))]
async fn delete_plant_species(
    State(state): State<AppState>,
    Tenant(tenant): Tenant,
    CorrelationId(correlation_id): CorrelationId,
    Path(id): Path<Uuid>,
) -> Result<Json<CommandResponse>, ApiError> {
    let command = commands::DeletePlantSpecies {
        correlation_id,
        tenant_id: tenant,
        species_id: id,
    };

    let outcome = command_handlers::handle_delete_plant_species(
        &command,
        state.clock.as_ref(),
        &*state.plant_species,
        &*state.event_bus,
    )
    .await?;

    Ok(Json(outcome.into()))
}

/// POST /search
#[instrument(skip(state, request), fields(tenant_id = %tenant.as_uuid()))]
async fn search_plant_species(
    State(state): State<AppState>,
    Tenant(tenant): Tenant,
    Json(request): Json<CriteriaRequest>,
) -> Result<Json<PaginatedResult<PlantSpeciesPrimitives>>, ApiError> {
    let criteria = Criteria::try_from(request)?;
    let page = query_handlers::find_plant_species_by_criteria(
        tenant,
        &criteria,
        &*state.plant_species_views,
    )
    .await?;
    Ok(Json(page))
}

/// Returns the router for the plant species context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_plant_species))
        .route("/search", post(search_plant_species))
        .route(
            "/{id}",
            get(get_plant_species)
                .patch(update_plant_species)
                .delete(delete_plant_species),
        )
}
