//! Command handlers for the Growing Units context.
//!
//! Each handler validates its input, loads the aggregate through
//! `AssertExists` (except create), mutates it and commits through
//! `commit_save` / `commit_delete`, which persist before publishing.

use greenhouse_core::bus::EventBus;
use greenhouse_core::clock::Clock;
use greenhouse_core::command::Command;
use greenhouse_core::error::DomainError;
use greenhouse_core::event::EventContext;
use greenhouse_core::handler::{CommandOutcome, commit_delete, commit_save};
use greenhouse_core::repository::{AssertExists, WriteRepository};
use tracing::info;
use uuid::Uuid;

use crate::domain::aggregates::{GrowingUnit, GrowingUnitProps, GrowingUnitUpdate};
use crate::domain::commands::{
    AddPlantToGrowingUnit, ChangePlantStatus, CreateGrowingUnit, DeleteGrowingUnit,
    RemovePlantFromGrowingUnit, UpdateGrowingUnit,
};
use crate::domain::plant::Plant;
use crate::domain::value_objects::{
    Capacity, Dimensions, GrowingUnitName, GrowingUnitType, PlantName, PlantStatus,
};

fn log_command(command: &dyn Command, aggregate_id: Uuid) {
    info!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id(),
        %aggregate_id,
        "handling command"
    );
}

/// Handles the `CreateGrowingUnit` command: validates the input, builds a
/// new aggregate and persists it.
///
/// # Errors
///
/// Returns `DomainError::Validation` if any field is invalid, or the
/// repository's error if the save fails.
pub async fn handle_create_growing_unit(
    command: &CreateGrowingUnit,
    clock: &dyn Clock,
    repo: &dyn WriteRepository<GrowingUnit>,
    bus: &dyn EventBus,
) -> Result<CommandOutcome, DomainError> {
    let props = GrowingUnitProps {
        id: Uuid::new_v4(),
        location_id: command.location_id,
        name: GrowingUnitName::new(&command.name)?,
        unit_type: command.unit_type.parse::<GrowingUnitType>()?,
        capacity: Capacity::new(command.capacity)?,
        dimensions: command.dimensions.map(Dimensions::try_from).transpose()?,
        plants: Vec::new(),
    };
    log_command(command, props.id);

    let ctx = EventContext::new(command.correlation_id, clock);
    let mut unit = GrowingUnit::create(props, &ctx);
    commit_save(&mut unit, command.tenant_id, repo, bus).await
}

/// Handles the `UpdateGrowingUnit` command.
///
/// # Errors
///
/// Returns `DomainError::Validation` if a supplied field is invalid,
/// `DomainError::NotFound` if the unit does not exist, or the repository's
/// error if loading or saving fails.
pub async fn handle_update_growing_unit(
    command: &UpdateGrowingUnit,
    clock: &dyn Clock,
    repo: &dyn WriteRepository<GrowingUnit>,
    bus: &dyn EventBus,
) -> Result<CommandOutcome, DomainError> {
    let update = GrowingUnitUpdate {
        name: command.name.as_deref().map(GrowingUnitName::new).transpose()?,
        unit_type: command
            .unit_type
            .as_deref()
            .map(str::parse::<GrowingUnitType>)
            .transpose()?,
        capacity: command.capacity.map(Capacity::new).transpose()?,
        dimensions: command.dimensions.map(Dimensions::try_from).transpose()?,
        location_id: command.location_id,
    };
    log_command(command, command.growing_unit_id);

    let mut unit = AssertExists::new(repo)
        .execute(command.tenant_id, command.growing_unit_id)
        .await?;
    let ctx = EventContext::new(command.correlation_id, clock);
    unit.update(update, &ctx, true);
    commit_save(&mut unit, command.tenant_id, repo, bus).await
}

/// Handles the `DeleteGrowingUnit` command.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the unit does not exist, or the
/// repository's error if loading or deleting fails.
pub async fn handle_delete_growing_unit(
    command: &DeleteGrowingUnit,
    clock: &dyn Clock,
    repo: &dyn WriteRepository<GrowingUnit>,
    bus: &dyn EventBus,
) -> Result<CommandOutcome, DomainError> {
    log_command(command, command.growing_unit_id);

    let mut unit = AssertExists::new(repo)
        .execute(command.tenant_id, command.growing_unit_id)
        .await?;
    let ctx = EventContext::new(command.correlation_id, clock);
    unit.delete(&ctx, true);
    commit_delete(&mut unit, command.tenant_id, repo, bus).await
}

/// Handles the `AddPlantToGrowingUnit` command. The unit must have a free
/// slot.
///
/// # Errors
///
/// Returns `DomainError::Validation` if an input field is invalid or the
/// unit is full, `DomainError::NotFound` if the unit does not exist, or the
/// repository's error if loading or saving fails.
pub async fn handle_add_plant(
    command: &AddPlantToGrowingUnit,
    clock: &dyn Clock,
    repo: &dyn WriteRepository<GrowingUnit>,
    bus: &dyn EventBus,
) -> Result<CommandOutcome, DomainError> {
    let status = command
        .status
        .as_deref()
        .map(str::parse::<PlantStatus>)
        .transpose()?
        .unwrap_or_default();
    let plant = Plant::new(
        Uuid::new_v4(),
        command.species_id,
        command.name.as_deref().map(PlantName::new).transpose()?,
        command.planted_date,
        command.notes.clone(),
        status,
    );
    log_command(command, command.growing_unit_id);

    let mut unit = AssertExists::new(repo)
        .execute(command.tenant_id, command.growing_unit_id)
        .await?;
    if !unit.has_capacity() {
        return Err(DomainError::Validation(format!(
            "growing unit {} is at full capacity ({})",
            unit.id(),
            unit.capacity().value()
        )));
    }
    let ctx = EventContext::new(command.correlation_id, clock);
    unit.add_plant(plant, &ctx, true);
    commit_save(&mut unit, command.tenant_id, repo, bus).await
}

/// Handles the `RemovePlantFromGrowingUnit` command.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the unit does not exist,
/// `DomainError::Validation` if the plant is not in the unit, or the
/// repository's error if loading or saving fails.
pub async fn handle_remove_plant(
    command: &RemovePlantFromGrowingUnit,
    clock: &dyn Clock,
    repo: &dyn WriteRepository<GrowingUnit>,
    bus: &dyn EventBus,
) -> Result<CommandOutcome, DomainError> {
    log_command(command, command.growing_unit_id);

    let mut unit = AssertExists::new(repo)
        .execute(command.tenant_id, command.growing_unit_id)
        .await?;
    let ctx = EventContext::new(command.correlation_id, clock);
    unit.remove_plant(command.plant_id, &ctx, true)?;
    commit_save(&mut unit, command.tenant_id, repo, bus).await
}

/// Handles the `ChangePlantStatus` command. An unknown plant id leaves the
/// unit untouched; the unchanged state is still saved and nothing is
/// published.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the status is unknown,
/// `DomainError::NotFound` if the unit does not exist, or the repository's
/// error if loading or saving fails.
pub async fn handle_change_plant_status(
    command: &ChangePlantStatus,
    clock: &dyn Clock,
    repo: &dyn WriteRepository<GrowingUnit>,
    bus: &dyn EventBus,
) -> Result<CommandOutcome, DomainError> {
    let status = command.status.parse::<PlantStatus>()?;
    log_command(command, command.growing_unit_id);

    let mut unit = AssertExists::new(repo)
        .execute(command.tenant_id, command.growing_unit_id)
        .await?;
    let ctx = EventContext::new(command.correlation_id, clock);
    unit.change_plant_status(command.plant_id, status, &ctx, true);
    commit_save(&mut unit, command.tenant_id, repo, bus).await
}
