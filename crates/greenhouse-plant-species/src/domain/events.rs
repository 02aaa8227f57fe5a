//! Domain events for the Plant Species context.

use greenhouse_core::event::{DomainEvent, EventMetadata, FieldChanged};
use serde::{Deserialize, Serialize};

use super::aggregates::PlantSpeciesPrimitives;
use super::value_objects::{Difficulty, GrowthRate, RangePrimitives, SpeciesCategory};

/// Event type for [`PlantSpeciesEventKind::Created`].
pub const PLANT_SPECIES_CREATED_EVENT_TYPE: &str = "plant_species.created";
/// Event type for [`PlantSpeciesEventKind::CommonNameChanged`].
pub const COMMON_NAME_CHANGED_EVENT_TYPE: &str = "plant_species.common_name_changed";
/// Event type for [`PlantSpeciesEventKind::ScientificNameChanged`].
pub const SCIENTIFIC_NAME_CHANGED_EVENT_TYPE: &str = "plant_species.scientific_name_changed";
/// Event type for [`PlantSpeciesEventKind::FamilyChanged`].
pub const FAMILY_CHANGED_EVENT_TYPE: &str = "plant_species.family_changed";
/// Event type for [`PlantSpeciesEventKind::CategoryChanged`].
pub const CATEGORY_CHANGED_EVENT_TYPE: &str = "plant_species.category_changed";
/// Event type for [`PlantSpeciesEventKind::DifficultyChanged`].
pub const DIFFICULTY_CHANGED_EVENT_TYPE: &str = "plant_species.difficulty_changed";
/// Event type for [`PlantSpeciesEventKind::GrowthRateChanged`].
pub const GROWTH_RATE_CHANGED_EVENT_TYPE: &str = "plant_species.growth_rate_changed";
/// Event type for [`PlantSpeciesEventKind::TemperatureRangeChanged`].
pub const TEMPERATURE_RANGE_CHANGED_EVENT_TYPE: &str = "plant_species.temperature_range_changed";
/// Event type for [`PlantSpeciesEventKind::PhRangeChanged`].
pub const PH_RANGE_CHANGED_EVENT_TYPE: &str = "plant_species.ph_range_changed";
/// Event type for [`PlantSpeciesEventKind::DaysToHarvestChanged`].
pub const DAYS_TO_HARVEST_CHANGED_EVENT_TYPE: &str = "plant_species.days_to_harvest_changed";
/// Event type for [`PlantSpeciesEventKind::Updated`].
pub const PLANT_SPECIES_UPDATED_EVENT_TYPE: &str = "plant_species.updated";
/// Event type for [`PlantSpeciesEventKind::Deleted`].
pub const PLANT_SPECIES_DELETED_EVENT_TYPE: &str = "plant_species.deleted";

/// Event payload variants for the Plant Species context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlantSpeciesEventKind {
    /// A species has been added to the catalogue.
    Created(PlantSpeciesPrimitives),
    /// The common name changed.
    CommonNameChanged(FieldChanged<String>),
    /// The scientific name changed.
    ScientificNameChanged(FieldChanged<String>),
    /// The family changed or was cleared.
    FamilyChanged(FieldChanged<Option<String>>),
    /// The category changed.
    CategoryChanged(FieldChanged<SpeciesCategory>),
    /// The difficulty changed.
    DifficultyChanged(FieldChanged<Difficulty>),
    /// The growth rate changed.
    GrowthRateChanged(FieldChanged<GrowthRate>),
    /// The temperature range changed or was cleared.
    TemperatureRangeChanged(FieldChanged<Option<RangePrimitives>>),
    /// The pH range changed or was cleared.
    PhRangeChanged(FieldChanged<Option<RangePrimitives>>),
    /// The days to harvest changed or was cleared.
    DaysToHarvestChanged(FieldChanged<Option<u32>>),
    /// One or more fields changed through a single update.
    Updated(PlantSpeciesPrimitives),
    /// The species has been removed from the catalogue.
    Deleted(PlantSpeciesPrimitives),
}

impl PlantSpeciesEventKind {
    /// Returns the event type tag for this payload.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Created(_) => PLANT_SPECIES_CREATED_EVENT_TYPE,
            Self::CommonNameChanged(_) => COMMON_NAME_CHANGED_EVENT_TYPE,
            Self::ScientificNameChanged(_) => SCIENTIFIC_NAME_CHANGED_EVENT_TYPE,
            Self::FamilyChanged(_) => FAMILY_CHANGED_EVENT_TYPE,
            Self::CategoryChanged(_) => CATEGORY_CHANGED_EVENT_TYPE,
            Self::DifficultyChanged(_) => DIFFICULTY_CHANGED_EVENT_TYPE,
            Self::GrowthRateChanged(_) => GROWTH_RATE_CHANGED_EVENT_TYPE,
            Self::TemperatureRangeChanged(_) => TEMPERATURE_RANGE_CHANGED_EVENT_TYPE,
            Self::PhRangeChanged(_) => PH_RANGE_CHANGED_EVENT_TYPE,
            Self::DaysToHarvestChanged(_) => DAYS_TO_HARVEST_CHANGED_EVENT_TYPE,
            Self::Updated(_) => PLANT_SPECIES_UPDATED_EVENT_TYPE,
            Self::Deleted(_) => PLANT_SPECIES_DELETED_EVENT_TYPE,
        }
    }
}

/// Domain event envelope for the Plant Species context.
#[derive(Debug, Clone)]
pub struct PlantSpeciesEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: PlantSpeciesEventKind,
}

impl DomainEvent for PlantSpeciesEvent {
    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    /// The variant's inner payload; the tag lives in `metadata.event_type`.
    fn to_payload(&self) -> serde_json::Value {
        use PlantSpeciesEventKind as K;
        let payload = match &self.kind {
            K::Created(species) | K::Updated(species) | K::Deleted(species) => {
                serde_json::to_value(species)
            }
            K::CommonNameChanged(change) | K::ScientificNameChanged(change) => {
                serde_json::to_value(change)
            }
            K::FamilyChanged(change) => serde_json::to_value(change),
            K::CategoryChanged(change) => serde_json::to_value(change),
            K::DifficultyChanged(change) => serde_json::to_value(change),
            K::GrowthRateChanged(change) => serde_json::to_value(change),
            K::TemperatureRangeChanged(change) | K::PhRangeChanged(change) => {
                serde_json::to_value(change)
            }
            K::DaysToHarvestChanged(change) => serde_json::to_value(change),
        };
        // Serialization of derived Serialize types to Value is infallible.
        payload.expect("plant species event payload serialization is infallible")
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
