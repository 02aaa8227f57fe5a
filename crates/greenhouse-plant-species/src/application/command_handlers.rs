//! Command handlers for the Plant Species context.

use greenhouse_core::bus::EventBus;
use greenhouse_core::clock::Clock;
use greenhouse_core::command::Command;
use greenhouse_core::error::DomainError;
use greenhouse_core::event::EventContext;
use greenhouse_core::handler::{CommandOutcome, commit_delete, commit_save};
use greenhouse_core::repository::{AssertExists, WriteRepository};
use tracing::info;
use uuid::Uuid;

use crate::domain::aggregates::{PlantSpecies, PlantSpeciesProps, PlantSpeciesUpdate};
use crate::domain::commands::{CreatePlantSpecies, DeletePlantSpecies, UpdatePlantSpecies};
use crate::domain::value_objects::{
    CommonName, DaysToHarvest, Difficulty, GrowthRate, PhRange, PlantFamily, ScientificName,
    SpeciesCategory, TemperatureRange,
};

fn parse_optional<T: std::str::FromStr<Err = DomainError>>(
    value: Option<&str>,
) -> Result<Option<T>, DomainError> {
    value.map(str::parse::<T>).transpose()
}

/// Handles the `CreatePlantSpecies` command.
///
/// # Errors
///
/// Returns `DomainError::Validation` if any field is invalid, or the
/// repository's error if the save fails.
pub async fn handle_create_plant_species(
    command: &CreatePlantSpecies,
    clock: &dyn Clock,
    repo: &dyn WriteRepository<PlantSpecies>,
    bus: &dyn EventBus,
) -> Result<CommandOutcome, DomainError> {
    let props = PlantSpeciesProps {
        id: Uuid::new_v4(),
        common_name: CommonName::new(&command.common_name)?,
        scientific_name: ScientificName::new(&command.scientific_name)?,
        family: command.family.as_deref().map(PlantFamily::new).transpose()?,
        category: command.category.parse::<SpeciesCategory>()?,
        difficulty: parse_optional::<Difficulty>(command.difficulty.as_deref())?
            .unwrap_or_default(),
        growth_rate: parse_optional::<GrowthRate>(command.growth_rate.as_deref())?
            .unwrap_or_default(),
        temperature_range: command
            .temperature_range
            .map(TemperatureRange::try_from)
            .transpose()?,
        ph_range: command.ph_range.map(PhRange::try_from).transpose()?,
        days_to_harvest: command.days_to_harvest.map(DaysToHarvest::new).transpose()?,
    };
    info!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id,
        species_id = %props.id,
        "handling command"
    );

    let ctx = EventContext::new(command.correlation_id, clock);
    let mut species = PlantSpecies::create(props, &ctx);
    commit_save(&mut species, command.tenant_id, repo, bus).await
}

/// Handles the `UpdatePlantSpecies` command.
///
/// # Errors
///
/// Returns `DomainError::Validation` if a supplied field is invalid,
/// `DomainError::NotFound` if the species does not exist, or the
/// repository's error if loading or saving fails.
pub async fn handle_update_plant_species(
    command: &UpdatePlantSpecies,
    clock: &dyn Clock,
    repo: &dyn WriteRepository<PlantSpecies>,
    bus: &dyn EventBus,
) -> Result<CommandOutcome, DomainError> {
    let update = PlantSpeciesUpdate {
        common_name: command.common_name.as_deref().map(CommonName::new).transpose()?,
        scientific_name: command
            .scientific_name
            .as_deref()
            .map(ScientificName::new)
            .transpose()?,
        family: command
            .family
            .as_ref()
            .map(|family| family.as_deref().map(PlantFamily::new).transpose())
            .transpose()?,
        category: parse_optional(command.category.as_deref())?,
        difficulty: parse_optional(command.difficulty.as_deref())?,
        growth_rate: parse_optional(command.growth_rate.as_deref())?,
        temperature_range: command
            .temperature_range
            .map(|range| range.map(TemperatureRange::try_from).transpose())
            .transpose()?,
        ph_range: command
            .ph_range
            .map(|range| range.map(PhRange::try_from).transpose())
            .transpose()?,
        days_to_harvest: command
            .days_to_harvest
            .map(|days| days.map(DaysToHarvest::new).transpose())
            .transpose()?,
    };
    info!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id,
        species_id = %command.species_id,
        "handling command"
    );

    let mut species = AssertExists::new(repo)
        .execute(command.tenant_id, command.species_id)
        .await?;
    let ctx = EventContext::new(command.correlation_id, clock);
    species.update(update, &ctx, true);
    commit_save(&mut species, command.tenant_id, repo, bus).await
}

/// Handles the `DeletePlantSpecies` command.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the species does not exist, or the
/// repository's error if loading or deleting fails.
pub async fn handle_delete_plant_species(
    command: &DeletePlantSpecies,
    clock: &dyn Clock,
    repo: &dyn WriteRepository<PlantSpecies>,
    bus: &dyn EventBus,
) -> Result<CommandOutcome, DomainError> {
    info!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id,
        species_id = %command.species_id,
        "handling command"
    );

    let mut species = AssertExists::new(repo)
        .execute(command.tenant_id, command.species_id)
        .await?;
    let ctx = EventContext::new(command.correlation_id, clock);
    species.delete(&ctx, true);
    commit_delete(&mut species, command.tenant_id, repo, bus).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::events::{
        DAYS_TO_HARVEST_CHANGED_EVENT_TYPE, DIFFICULTY_CHANGED_EVENT_TYPE,
        PLANT_SPECIES_CREATED_EVENT_TYPE, PLANT_SPECIES_DELETED_EVENT_TYPE,
        PLANT_SPECIES_UPDATED_EVENT_TYPE,
    };
    use crate::domain::value_objects::RangePrimitives;
    use greenhouse_core::aggregate::Persistable;
    use greenhouse_core::tenant::TenantId;
    use greenhouse_test_support::{CallLog, FixedClock, RecordingEventBus, RecordingRepository};

    fn create_command(tenant_id: TenantId) -> CreatePlantSpecies {
        CreatePlantSpecies {
            correlation_id: Uuid::new_v4(),
            tenant_id,
            common_name: "Tomato".to_owned(),
            scientific_name: "Solanum lycopersicum".to_owned(),
            family: Some("Solanaceae".to_owned()),
            category: "VEGETABLE".to_owned(),
            difficulty: None,
            growth_rate: Some("fast".to_owned()),
            temperature_range: Some(RangePrimitives { min: 16.0, max: 29.0 }),
            ph_range: Some(RangePrimitives { min: 6.2, max: 6.8 }),
            days_to_harvest: Some(75),
        }
    }

    #[tokio::test]
    async fn test_create_persists_and_publishes() {
        // Arrange
        let log = CallLog::new();
        let repo = RecordingRepository::<PlantSpecies>::new(log.clone());
        let bus = RecordingEventBus::new(log.clone());
        let tenant_id = TenantId::new(Uuid::new_v4());

        // Act
        let outcome =
            handle_create_plant_species(&create_command(tenant_id), &FixedClock::default(), &repo, &bus)
                .await
                .unwrap();

        // Assert
        let stored: PlantSpecies = repo.get(tenant_id, outcome.aggregate_id).unwrap();
        assert_eq!(stored.difficulty(), Difficulty::Medium);
        assert_eq!(stored.growth_rate(), GrowthRate::Fast);
        assert_eq!(bus.event_types(), vec![PLANT_SPECIES_CREATED_EVENT_TYPE]);
        assert_eq!(log.names(), vec!["save", "publish_all"]);
    }

    #[tokio::test]
    async fn test_create_rejects_inverted_temperature_range() {
        let log = CallLog::new();
        let repo = RecordingRepository::<PlantSpecies>::new(log.clone());
        let bus = RecordingEventBus::new(log.clone());
        let command = CreatePlantSpecies {
            temperature_range: Some(RangePrimitives { min: 30.0, max: 5.0 }),
            ..create_command(TenantId::new(Uuid::new_v4()))
        };

        let result = handle_create_plant_species(&command, &FixedClock::default(), &repo, &bus).await;

        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert!(log.names().is_empty());
    }

    #[tokio::test]
    async fn test_update_changes_fields_and_publishes_snapshot_last() {
        // Arrange
        let log = CallLog::new();
        let repo = RecordingRepository::<PlantSpecies>::new(log.clone());
        let bus = RecordingEventBus::new(log.clone());
        let tenant_id = TenantId::new(Uuid::new_v4());
        let created =
            handle_create_plant_species(&create_command(tenant_id), &FixedClock::default(), &repo, &bus)
                .await
                .unwrap();
        let command = UpdatePlantSpecies {
            correlation_id: Uuid::new_v4(),
            tenant_id,
            species_id: created.aggregate_id,
            common_name: None,
            scientific_name: None,
            family: None,
            category: None,
            difficulty: Some("HARD".to_owned()),
            growth_rate: None,
            temperature_range: None,
            ph_range: None,
            days_to_harvest: None,
        };

        // Act
        let outcome = handle_update_plant_species(&command, &FixedClock::default(), &repo, &bus)
            .await
            .unwrap();

        // Assert
        let types: Vec<&str> = outcome.events.iter().map(|e| e.event_type()).collect();
        assert_eq!(
            types,
            vec![DIFFICULTY_CHANGED_EVENT_TYPE, PLANT_SPECIES_UPDATED_EVENT_TYPE]
        );
        let stored: PlantSpecies = repo.get(tenant_id, created.aggregate_id).unwrap();
        assert_eq!(stored.difficulty(), Difficulty::Hard);
    }

    #[tokio::test]
    async fn test_update_with_explicit_none_clears_days_to_harvest() {
        // Arrange
        let log = CallLog::new();
        let repo = RecordingRepository::<PlantSpecies>::new(log.clone());
        let bus = RecordingEventBus::new(log.clone());
        let tenant_id = TenantId::new(Uuid::new_v4());
        let created =
            handle_create_plant_species(&create_command(tenant_id), &FixedClock::default(), &repo, &bus)
                .await
                .unwrap();
        let command = UpdatePlantSpecies {
            correlation_id: Uuid::new_v4(),
            tenant_id,
            species_id: created.aggregate_id,
            common_name: None,
            scientific_name: None,
            family: None,
            category: None,
            difficulty: None,
            growth_rate: None,
            temperature_range: None,
            ph_range: None,
            days_to_harvest: Some(None),
        };

        // Act
        let outcome = handle_update_plant_species(&command, &FixedClock::default(), &repo, &bus)
            .await
            .unwrap();

        // Assert
        let types: Vec<&str> = outcome.events.iter().map(|e| e.event_type()).collect();
        assert_eq!(
            types,
            vec![DAYS_TO_HARVEST_CHANGED_EVENT_TYPE, PLANT_SPECIES_UPDATED_EVENT_TYPE]
        );
        let stored: PlantSpecies = repo.get(tenant_id, created.aggregate_id).unwrap();
        assert!(stored.days_to_harvest().is_none());
        assert!(stored.family().is_some());
    }

    #[tokio::test]
    async fn test_update_missing_species_is_not_found() {
        let log = CallLog::new();
        let repo = RecordingRepository::<PlantSpecies>::new(log.clone());
        let bus = RecordingEventBus::new(log.clone());
        let command = UpdatePlantSpecies {
            correlation_id: Uuid::new_v4(),
            tenant_id: TenantId::new(Uuid::new_v4()),
            species_id: Uuid::new_v4(),
            common_name: Some("Ghost".to_owned()),
            scientific_name: None,
            family: None,
            category: None,
            difficulty: None,
            growth_rate: None,
            temperature_range: None,
            ph_range: None,
            days_to_harvest: None,
        };

        let result = handle_update_plant_species(&command, &FixedClock::default(), &repo, &bus).await;

        assert!(matches!(
            result,
            Err(DomainError::NotFound { aggregate_type: "plant_species", .. })
        ));
        assert_eq!(log.names(), vec!["find_by_id"]);
    }

    #[tokio::test]
    async fn test_delete_publishes_snapshot_after_delete() {
        // Arrange
        let log = CallLog::new();
        let repo = RecordingRepository::<PlantSpecies>::new(log.clone());
        let bus = RecordingEventBus::new(log.clone());
        let tenant_id = TenantId::new(Uuid::new_v4());
        let created =
            handle_create_plant_species(&create_command(tenant_id), &FixedClock::default(), &repo, &bus)
                .await
                .unwrap();
        let before: PlantSpecies = repo.get(tenant_id, created.aggregate_id).unwrap();
        let command = DeletePlantSpecies {
            correlation_id: Uuid::new_v4(),
            tenant_id,
            species_id: created.aggregate_id,
        };

        // Act
        handle_delete_plant_species(&command, &FixedClock::default(), &repo, &bus)
            .await
            .unwrap();

        // Assert
        assert!(repo.is_empty());
        let calls = log.names();
        assert_eq!(&calls[calls.len() - 2..], &["delete", "publish_all"]);
        let last = bus.batches().pop().unwrap();
        assert_eq!(last.len(), 1);
        assert_eq!(last[0].event_type(), PLANT_SPECIES_DELETED_EVENT_TYPE);
        assert_eq!(
            last[0].data,
            serde_json::to_value(before.to_primitives()).unwrap()
        );
    }
}
