//! Routes for the Growing Units bounded context.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, patch, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use greenhouse_core::criteria::{Criteria, CriteriaRequest};
use greenhouse_core::pagination::PaginatedResult;
use greenhouse_growing_unit::application::command_handlers;
use greenhouse_growing_unit::application::query_handlers::{self, GrowingUnitView};
use greenhouse_growing_unit::domain::commands;
use greenhouse_growing_unit::domain::value_objects::DimensionsPrimitives;
use serde::Deserialize;
use tracing::instrument;
use uuid::Uuid;

use crate::error::ApiError;
use crate::extract::{CorrelationId, Tenant};
use crate::routes::CommandResponse;
use crate::state::AppState;

/// Request body for POST /.
#[derive(Debug, Deserialize)]
pub struct CreateGrowingUnitRequest {
    /// The location the unit sits in.
    pub location_id: Uuid,
    /// Display name.
    pub name: String,
    /// Container type, e.g. `POT`.
    pub unit_type: String,
    /// Maximum number of plants.
    pub capacity: i64,
    /// Physical size.
    #[serde(default)]
    pub dimensions: Option<DimensionsPrimitives>,
}

/// Request body for PATCH /{id}.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateGrowingUnitRequest {
    /// New display name.
    pub name: Option<String>,
    /// New container type.
    pub unit_type: Option<String>,
    /// New capacity.
    pub capacity: Option<i64>,
    /// New dimensions.
    pub dimensions: Option<DimensionsPrimitives>,
    /// New location.
    pub location_id: Option<Uuid>,
}

/// Request body for POST /{id}/plants.
#[derive(Debug, Default, Deserialize)]
pub struct AddPlantRequest {
    /// Species of the plant.
    pub species_id: Option<Uuid>,
    /// Nickname.
    pub name: Option<String>,
    /// When the plant went in.
    pub planted_date: Option<DateTime<Utc>>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Initial status.
    pub status: Option<String>,
}

/// Request body for PATCH /{id}/plants/{plant_id}/status.
#[derive(Debug, Deserialize)]
pub struct ChangePlantStatusRequest {
    /// New status, e.g. `GROWING`.
    pub status: String,
}

/// POST /
#[instrument(skip(state, request), fields(tenant_id = %tenant.as_uuid()))]
async fn create_growing_unit(
    State(state): State<AppState>,
    Tenant(tenant): Tenant,
    CorrelationId(correlation_id): CorrelationId,
    Json(request): Json<CreateGrowingUnitRequest>,
) -> Result<(StatusCode, Json<CommandResponse>), ApiError> {
    let command = commands::CreateGrowingUnit {
        correlation_id,
        tenant_id: tenant,
        location_id: request.location_id,
        name: request.name,
        unit_type: request.unit_type,
        capacity: request.capacity,
        dimensions: request.dimensions,
    };

    let outcome = command_handlers::handle_create_growing_unit(
        &command,
        state.clock.as_ref(),
        &*state.growing_units,
        &*state.event_bus,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(outcome.into())))
}

/// GET /{id}
#[instrument(skip(state), fields(tenant_id = %tenant.as_uuid()))]
async fn get_growing_unit(
    State(state): State<AppState>,
    Tenant(tenant): Tenant,
    Path(id): Path<Uuid>,
) -> Result<Json<GrowingUnitView>, ApiError> {
    let view =
        query_handlers::get_growing_unit_by_id(tenant, id, &*state.growing_unit_views).await?;
    Ok(Json(view))
}

/// PATCH /{id}
#[instrument(skip(state, request), fields(tenant_id = %tenant.as_uuid()))]
async fn update_growing_unit(
    State(state): State<AppState>,
    Tenant(tenant): Tenant,
    CorrelationId(correlation_id): CorrelationId,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateGrowingUnitRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let command = commands::UpdateGrowingUnit {
        correlation_id,
        tenant_id: tenant,
        growing_unit_id: id,
        name: request.name,
        unit_type: request.unit_type,
        capacity: request.capacity,
        dimensions: request.dimensions,
        location_id: request.location_id,
    };

    let outcome = command_handlers::handle_update_growing_unit(
        &command,
        state.clock.as_ref(),
        &*state.growing_units,
        &*state.event_bus,
    )
    .await?;

    Ok(Json(outcome.into()))
}

/// DELETE /{id}
#[instrument(skip(state), fields(tenant_id = %tenant.as_uuid()))]
async fn delete_growing_unit(
    State(state): State<AppState>,
    Tenant(tenant): Tenant,
    CorrelationId(correlation_id): CorrelationId,
    Path(id): Path<Uuid>,
) -> Result<Json<CommandResponse>, ApiError> {
    let command = commands::DeleteGrowingUnit {
        correlation_id,
        tenant_id: tenant,
        growing_unit_id: id,
    };

    let outcome = command_handlers::handle_delete_growing_unit(
        &command,
        state.clock.as_ref(),
        &*state.growing_units,
        &*state.event_bus,
    )
    .await?;

    Ok(Json(outcome.into()))
}

/// POST /search
#[instrument(skip(state, request), fields(tenant_id = %tenant.as_uuid()))]
async fn search_growing_units(
    State(state): State<AppState>,
    Tenant(tenant): Tenant,
    Json(request): Json<CriteriaRequest>,
) -> Result<Json<PaginatedResult<GrowingUnitView>>, ApiError> {
    let criteria = Criteria::try_from(request)?;
    let page = query_handlers::find_growing_units_by_criteria(
        tenant,
        &criteria,
        &*state.growing_unit_views,
    )
    .await?;
    Ok(Json(page))
}

/// POST /{id}/plants
#[instrument(skip(state, request), fields(tenant_id = %tenant.as_uuid()))]
async fn add_plant(
    State(state): State<AppState>,
    Tenant(tenant): Tenant,
    CorrelationId(correlation_id): CorrelationId,
    Path(id): Path<Uuid>,
    Json(request): Json<AddPlantRequest>,
) -> Result<(StatusCode, Json<CommandResponse>), ApiError> {
    let command = commands::AddPlantToGrowingUnit {
        correlation_id,
        tenant_id: tenant,
        growing_unit_id: id,
        species_id: request.species_id,
        name: request.name,
        planted_date: request.planted_date,
        notes: request.notes,
        status: request.status,
    };

    let outcome = command_handlers::handle_add_plant(
        &command,
        state.clock.as_ref(),
        &*state.growing_units,
        &*state.event_bus,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(outcome.into())))
}

/// DELETE /{id}/plants/{plant_id}
#[instrument(skip(state), fields(tenant_id = %tenant.as_uuid()))]
async fn remove_plant(
    State(state): State<AppState>,
    Tenant(tenant): Tenant,
    CorrelationId(correlation_id): CorrelationId,
    Path((id, plant_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<CommandResponse>, ApiError> {
    let command = commands::RemovePlantFromGrowingUnit {
        correlation_id,
        tenant_id: tenant,
        growing_unit_id: id,
        plant_id,
    };

    let outcome = command_handlers::handle_remove_plant(
        &command,
        state.clock.as_ref(),
        &*state.growing_units,
        &*state.event_bus,
    )
    .await?;

    Ok(Json(outcome.into()))
}

/// PATCH /{id}/plants/{plant_id}/status
#[instrument(skip(state, request), fields(tenant_id = %tenant.as_uuid()))]
async fn change_plant_status(
    State(state): State<AppState>,
    Tenant(tenant): Tenant,
    CorrelationId(correlation_id): CorrelationId,
    Path((id, plant_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<ChangePlantStatusRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let command = commands::ChangePlantStatus {
        correlation_id,
        tenant_id: tenant,
        growing_unit_id: id,
        plant_id,
        status: request.status,
    };

    let outcome = command_handlers::handle_change_plant_status(
        &command,
        state.clock.as_ref(),
        &*state.growing_units,
        &*state.event_bus,
    )
    .await?;

    Ok(Json(outcome.into()))
}

/// Returns the router for the growing units context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_growing_unit))
        .route("/search", post(search_growing_units))
        .route(
            "/{id}",
            get(get_growing_unit)
                .patch(update_growing_unit)
                .delete(delete_growing_unit),
        )
        .route("/{id}/plants", post(add_plant))
        .route("/{id}/plants/{plant_id}", delete(remove_plant))
        .route("/{id}/plants/{plant_id}/status", patch(change_plant_status))
}
