//! Domain events for the Growing Units context.

use greenhouse_core::event::{DomainEvent, EventMetadata, FieldChanged};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::aggregates::GrowingUnitPrimitives;
use super::plant::PlantPrimitives;
use super::value_objects::{DimensionsPrimitives, GrowingUnitType, PlantStatus};

/// Event type for [`GrowingUnitEventKind::Created`].
pub const GROWING_UNIT_CREATED_EVENT_TYPE: &str = "growing_unit.created";
/// Event type for [`GrowingUnitEventKind::NameChanged`].
pub const GROWING_UNIT_NAME_CHANGED_EVENT_TYPE: &str = "growing_unit.name_changed";
/// Event type for [`GrowingUnitEventKind::TypeChanged`].
pub const GROWING_UNIT_TYPE_CHANGED_EVENT_TYPE: &str = "growing_unit.type_changed";
/// Event type for [`GrowingUnitEventKind::CapacityChanged`].
pub const GROWING_UNIT_CAPACITY_CHANGED_EVENT_TYPE: &str = "growing_unit.capacity_changed";
/// Event type for [`GrowingUnitEventKind::DimensionsChanged`].
pub const GROWING_UNIT_DIMENSIONS_CHANGED_EVENT_TYPE: &str = "growing_unit.dimensions_changed";
/// Event type for [`GrowingUnitEventKind::LocationChanged`].
pub const GROWING_UNIT_LOCATION_CHANGED_EVENT_TYPE: &str = "growing_unit.location_changed";
/// Event type for [`GrowingUnitEventKind::Updated`].
pub const GROWING_UNIT_UPDATED_EVENT_TYPE: &str = "growing_unit.updated";
/// Event type for [`GrowingUnitEventKind::Deleted`].
pub const GROWING_UNIT_DELETED_EVENT_TYPE: &str = "growing_unit.deleted";
/// Event type for [`GrowingUnitEventKind::PlantAdded`].
pub const PLANT_ADDED_EVENT_TYPE: &str = "growing_unit.plant_added";
/// Event type for [`GrowingUnitEventKind::PlantRemoved`].
pub const PLANT_REMOVED_EVENT_TYPE: &str = "growing_unit.plant_removed";
/// Event type for [`GrowingUnitEventKind::PlantStatusChanged`].
pub const PLANT_STATUS_CHANGED_EVENT_TYPE: &str = "growing_unit.plant_status_changed";

/// Emitted when a plant is added to or removed from a growing unit. For
/// removals the snapshot is taken before the plant is dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantSnapshot {
    /// The growing unit identifier.
    pub growing_unit_id: Uuid,
    /// The plant as it was at the time of the event.
    pub plant: PlantPrimitives,
}

/// Emitted when a plant's status changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantStatusChanged {
    /// The growing unit identifier.
    pub growing_unit_id: Uuid,
    /// The plant identifier.
    pub plant_id: Uuid,
    /// Status before the change.
    pub old_value: PlantStatus,
    /// Status after the change.
    pub new_value: PlantStatus,
}

/// Event payload variants for the Growing Units context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GrowingUnitEventKind {
    /// A growing unit has been created.
    Created(GrowingUnitPrimitives),
    /// The name changed.
    NameChanged(FieldChanged<String>),
    /// The container type changed.
    TypeChanged(FieldChanged<GrowingUnitType>),
    /// The capacity changed.
    CapacityChanged(FieldChanged<u32>),
    /// The dimensions changed.
    DimensionsChanged(FieldChanged<Option<DimensionsPrimitives>>),
    /// The unit moved to another location.
    LocationChanged(FieldChanged<Uuid>),
    /// One or more fields changed through a single update.
    Updated(GrowingUnitPrimitives),
    /// The growing unit has been deleted.
    Deleted(GrowingUnitPrimitives),
    /// A plant has been added.
    PlantAdded(PlantSnapshot),
    /// A plant has been removed.
    PlantRemoved(PlantSnapshot),
    /// A plant's status changed.
    PlantStatusChanged(PlantStatusChanged),
}

impl GrowingUnitEventKind {
    /// Returns the event type tag for this payload.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Created(_) => GROWING_UNIT_CREATED_EVENT_TYPE,
            Self::NameChanged(_) => GROWING_UNIT_NAME_CHANGED_EVENT_TYPE,
            Self::TypeChanged(_) => GROWING_UNIT_TYPE_CHANGED_EVENT_TYPE,
            Self::CapacityChanged(_) => GROWING_UNIT_CAPACITY_CHANGED_EVENT_TYPE,
            Self::DimensionsChanged(_) => GROWING_UNIT_DIMENSIONS_CHANGED_EVENT_TYPE,
            Self::LocationChanged(_) => GROWING_UNIT_LOCATION_CHANGED_EVENT_TYPE,
            Self::Updated(_) => GROWING_UNIT_UPDATED_EVENT_TYPE,
            Self::Deleted(_) => GROWING_UNIT_DELETED_EVENT_TYPE,
            Self::PlantAdded(_) => PLANT_ADDED_EVENT_TYPE,
            Self::PlantRemoved(_) => PLANT_REMOVED_EVENT_TYPE,
            Self::PlantStatusChanged(_) => PLANT_STATUS_CHANGED_EVENT_TYPE,
        }
    }
}

/// Domain event envelope for the Growing Units context.
#[derive(Debug, Clone)]
pub struct GrowingUnitEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: GrowingUnitEventKind,
}

impl DomainEvent for GrowingUnitEvent {
    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    /// The variant's inner payload; the tag lives in `metadata.event_type`.
    fn to_payload(&self) -> serde_json::Value {
        use GrowingUnitEventKind as K;
        let payload = match &self.kind {
            K::Created(unit) | K::Updated(unit) | K::Deleted(unit) => serde_json::to_value(unit),
            K::NameChanged(change) => serde_json::to_value(change),
            K::TypeChanged(change) => serde_json::to_value(change),
            K::CapacityChanged(change) => serde_json::to_value(change),
            K::DimensionsChanged(change) => serde_json::to_value(change),
            K::LocationChanged(change) => serde_json::to_value(change),
            K::PlantAdded(snapshot) | K::PlantRemoved(snapshot) => serde_json::to_value(snapshot),
            K::PlantStatusChanged(change) => serde_json::to_value(change),
        };
        // Serialization of derived Serialize types to Value is infallible.
        payload.expect("growing unit event payload serialization is infallible")
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
