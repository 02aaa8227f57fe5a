//! Aggregate roots for the Growing Units context.

use greenhouse_core::aggregate::{AggregateRoot, EventRecorder, Persistable};
use greenhouse_core::error::DomainError;
use greenhouse_core::event::{EventContext, EventMetadata, FieldChanged};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::events::{GrowingUnitEvent, GrowingUnitEventKind, PlantSnapshot, PlantStatusChanged};
use super::plant::{Plant, PlantPrimitives};
use super::value_objects::{
    Capacity, Dimensions, DimensionsPrimitives, GrowingUnitName, GrowingUnitType, PlantStatus,
};

/// Plain form of a [`GrowingUnit`], plants included. This is both the
/// stored document and the read model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowingUnitPrimitives {
    /// Aggregate identifier.
    pub id: Uuid,
    /// Location the unit sits in.
    pub location_id: Uuid,
    /// Display name.
    pub name: String,
    /// Container type.
    pub unit_type: GrowingUnitType,
    /// Maximum number of plants.
    pub capacity: u32,
    /// Physical size, if recorded.
    pub dimensions: Option<DimensionsPrimitives>,
    /// Plants currently in the unit.
    #[serde(default)]
    pub plants: Vec<PlantPrimitives>,
}

/// Everything needed to build a [`GrowingUnit`].
#[derive(Debug, Clone)]
pub struct GrowingUnitProps {
    /// Aggregate identifier.
    pub id: Uuid,
    /// Location the unit sits in.
    pub location_id: Uuid,
    /// Display name.
    pub name: GrowingUnitName,
    /// Container type.
    pub unit_type: GrowingUnitType,
    /// Maximum number of plants.
    pub capacity: Capacity,
    /// Physical size.
    pub dimensions: Option<Dimensions>,
    /// Plants already in the unit.
    pub plants: Vec<Plant>,
}

/// Partial update of a growing unit. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct GrowingUnitUpdate {
    /// New name.
    pub name: Option<GrowingUnitName>,
    /// New container type.
    pub unit_type: Option<GrowingUnitType>,
    /// New capacity.
    pub capacity: Option<Capacity>,
    /// New dimensions.
    pub dimensions: Option<Dimensions>,
    /// New location.
    pub location_id: Option<Uuid>,
}

impl GrowingUnitUpdate {
    /// Whether the update touches no field.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.unit_type.is_none()
            && self.capacity.is_none()
            && self.dimensions.is_none()
            && self.location_id.is_none()
    }
}

/// The aggregate root for a growing unit and the plants it holds.
#[derive(Debug, Clone)]
pub struct GrowingUnit {
    id: Uuid,
    location_id: Uuid,
    name: GrowingUnitName,
    unit_type: GrowingUnitType,
    capacity: Capacity,
    dimensions: Option<Dimensions>,
    plants: Vec<Plant>,
    events: EventRecorder<GrowingUnitEvent>,
}

impl GrowingUnit {
    /// Creates a new growing unit and records `growing_unit.created`.
    #[must_use]
    pub fn create(props: GrowingUnitProps, ctx: &EventContext<'_>) -> Self {
        let mut unit = Self::reconstitute(props);
        let snapshot = unit.to_primitives();
        unit.record(GrowingUnitEventKind::Created(snapshot), ctx);
        unit
    }

    /// Rebuilds a growing unit from trusted state without recording events.
    #[must_use]
    pub fn reconstitute(props: GrowingUnitProps) -> Self {
        Self {
            id: props.id,
            location_id: props.location_id,
            name: props.name,
            unit_type: props.unit_type,
            capacity: props.capacity,
            dimensions: props.dimensions,
            plants: props.plants,
            events: EventRecorder::new(),
        }
    }

    fn record(&mut self, kind: GrowingUnitEventKind, ctx: &EventContext<'_>) {
        let event = GrowingUnitEvent {
            metadata: EventMetadata::new(kind.event_type(), Self::AGGREGATE_TYPE, self.id, ctx),
            kind,
        };
        self.apply(event);
    }

    /// Aggregate identifier.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Location identifier.
    #[must_use]
    pub fn location_id(&self) -> Uuid {
        self.location_id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &GrowingUnitName {
        &self.name
    }

    /// Container type.
    #[must_use]
    pub fn unit_type(&self) -> GrowingUnitType {
        self.unit_type
    }

    /// Maximum number of plants.
    #[must_use]
    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    /// Physical size.
    #[must_use]
    pub fn dimensions(&self) -> Option<&Dimensions> {
        self.dimensions.as_ref()
    }

    /// Plants in insertion order.
    #[must_use]
    pub fn plants(&self) -> &[Plant] {
        &self.plants
    }

    /// Looks up a plant by id.
    #[must_use]
    pub fn plant_by_id(&self, plant_id: Uuid) -> Option<&Plant> {
        self.plants.iter().find(|p| p.id() == plant_id)
    }

    /// Whether another plant fits.
    #[must_use]
    pub fn has_capacity(&self) -> bool {
        self.plants.len() < self.capacity.value() as usize
    }

    /// Free slots left. Never negative, even when the capacity has been
    /// lowered below the current plant count.
    #[must_use]
    pub fn remaining_capacity(&self) -> u32 {
        let used = u32::try_from(self.plants.len()).unwrap_or(u32::MAX);
        self.capacity.value().saturating_sub(used)
    }

    /// Renames the unit. Records `growing_unit.name_changed` unless
    /// `emit_event` is false.
    pub fn change_name(&mut self, name: GrowingUnitName, ctx: &EventContext<'_>, emit_event: bool) {
        let old = std::mem::replace(&mut self.name, name);
        if emit_event {
            let change = FieldChanged::new(self.id, old.to_string(), self.name.to_string());
            self.record(GrowingUnitEventKind::NameChanged(change), ctx);
        }
    }

    /// Changes the container type. Records `growing_unit.type_changed`
    /// unless `emit_event` is false.
    pub fn change_type(
        &mut self,
        unit_type: GrowingUnitType,
        ctx: &EventContext<'_>,
        emit_event: bool,
    ) {
        let old = std::mem::replace(&mut self.unit_type, unit_type);
        if emit_event {
            let change = FieldChanged::new(self.id, old, unit_type);
            self.record(GrowingUnitEventKind::TypeChanged(change), ctx);
        }
    }

    /// Changes the capacity. Existing plants are kept even if they no
    /// longer fit. Records `growing_unit.capacity_changed` unless
    /// `emit_event` is false.
    pub fn change_capacity(&mut self, capacity: Capacity, ctx: &EventContext<'_>, emit_event: bool) {
        let old = std::mem::replace(&mut self.capacity, capacity);
        if emit_event {
            let change = FieldChanged::new(self.id, old.value(), capacity.value());
            self.record(GrowingUnitEventKind::CapacityChanged(change), ctx);
        }
    }

    /// Changes the dimensions. Records `growing_unit.dimensions_changed`
    /// unless `emit_event` is false.
    pub fn change_dimensions(
        &mut self,
        dimensions: Dimensions,
        ctx: &EventContext<'_>,
        emit_event: bool,
    ) {
        let old = self.dimensions.replace(dimensions);
        if emit_event {
            let change = FieldChanged::new(
                self.id,
                old.map(|d| d.to_primitives()),
                Some(dimensions.to_primitives()),
            );
            self.record(GrowingUnitEventKind::DimensionsChanged(change), ctx);
        }
    }

    /// Moves the unit to another location. Records
    /// `growing_unit.location_changed` unless `emit_event` is false.
    pub fn change_location(&mut self, location_id: Uuid, ctx: &EventContext<'_>, emit_event: bool) {
        let old = std::mem::replace(&mut self.location_id, location_id);
        if emit_event {
            let change = FieldChanged::new(self.id, old, location_id);
            self.record(GrowingUnitEventKind::LocationChanged(change), ctx);
        }
    }

    /// Applies every present field through its own mutator (so each emits
    /// its granular event), then records a `growing_unit.updated` snapshot.
    /// With `emit_event` false nothing at all is recorded.
    pub fn update(&mut self, update: GrowingUnitUpdate, ctx: &EventContext<'_>, emit_event: bool) {
        if let Some(name) = update.name {
            self.change_name(name, ctx, emit_event);
        }
        if let Some(unit_type) = update.unit_type {
            self.change_type(unit_type, ctx, emit_event);
        }
        if let Some(capacity) = update.capacity {
            self.change_capacity(capacity, ctx, emit_event);
        }
        if let Some(dimensions) = update.dimensions {
            self.change_dimensions(dimensions, ctx, emit_event);
        }
        if let Some(location_id) = update.location_id {
            self.change_location(location_id, ctx, emit_event);
        }
        if emit_event {
            let snapshot = self.to_primitives();
            self.record(GrowingUnitEventKind::Updated(snapshot), ctx);
        }
    }

    /// Appends a plant. Capacity is not checked here; callers decide
    /// whether a full unit may still take plants.
    pub fn add_plant(&mut self, plant: Plant, ctx: &EventContext<'_>, emit_event: bool) {
        let snapshot = plant.to_primitives();
        self.plants.push(plant);
        if emit_event {
            let payload = PlantSnapshot {
                growing_unit_id: self.id,
                plant: snapshot,
            };
            self.record(GrowingUnitEventKind::PlantAdded(payload), ctx);
        }
    }

    /// Removes a plant. The event carries the plant as it was before
    /// removal.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the plant is not in this unit.
    pub fn remove_plant(
        &mut self,
        plant_id: Uuid,
        ctx: &EventContext<'_>,
        emit_event: bool,
    ) -> Result<(), DomainError> {
        let Some(index) = self.plants.iter().position(|p| p.id() == plant_id) else {
            return Err(DomainError::Validation(format!(
                "plant {plant_id} not found in growing unit {}",
                self.id
            )));
        };
        let removed = self.plants.remove(index);
        if emit_event {
            let payload = PlantSnapshot {
                growing_unit_id: self.id,
                plant: removed.to_primitives(),
            };
            self.record(GrowingUnitEventKind::PlantRemoved(payload), ctx);
        }
        Ok(())
    }

    /// Sets a plant's status. An unknown plant id is ignored: nothing
    /// changes and nothing is recorded.
    pub fn change_plant_status(
        &mut self,
        plant_id: Uuid,
        status: PlantStatus,
        ctx: &EventContext<'_>,
        emit_event: bool,
    ) {
        let Some(plant) = self.plants.iter_mut().find(|p| p.id() == plant_id) else {
            return;
        };
        let old = plant.status();
        plant.set_status(status);
        if emit_event {
            let payload = PlantStatusChanged {
                growing_unit_id: self.id,
                plant_id,
                old_value: old,
                new_value: status,
            };
            self.record(GrowingUnitEventKind::PlantStatusChanged(payload), ctx);
        }
    }

    /// Marks the unit for deletion by recording a `growing_unit.deleted`
    /// snapshot. Removing the row is the repository's job.
    pub fn delete(&mut self, ctx: &EventContext<'_>, emit_event: bool) {
        if emit_event {
            let snapshot = self.to_primitives();
            self.record(GrowingUnitEventKind::Deleted(snapshot), ctx);
        }
    }
}

impl AggregateRoot for GrowingUnit {
    type Event = GrowingUnitEvent;

    const AGGREGATE_TYPE: &'static str = "growing_unit";

    fn aggregate_id(&self) -> Uuid {
        self.id
    }

    fn recorder(&self) -> &EventRecorder<Self::Event> {
        &self.events
    }

    fn recorder_mut(&mut self) -> &mut EventRecorder<Self::Event> {
        &mut self.events
    }
}

impl Persistable for GrowingUnit {
    type Primitives = GrowingUnitPrimitives;

    fn to_primitives(&self) -> GrowingUnitPrimitives {
        GrowingUnitPrimitives {
            id: self.id,
            location_id: self.location_id,
            name: self.name.to_string(),
            unit_type: self.unit_type,
            capacity: self.capacity.value(),
            dimensions: self.dimensions.map(|d| d.to_primitives()),
            plants: self.plants.iter().map(Plant::to_primitives).collect(),
        }
    }

    fn from_primitives(p: GrowingUnitPrimitives) -> Result<Self, DomainError> {
        Ok(Self::reconstitute(GrowingUnitProps {
            id: p.id,
            location_id: p.location_id,
            name: GrowingUnitName::new(&p.name)?,
            unit_type: p.unit_type,
            capacity: Capacity::from(p.capacity),
            dimensions: p.dimensions.map(Dimensions::try_from).transpose()?,
            plants: p
                .plants
                .into_iter()
                .map(Plant::try_from)
                .collect::<Result<Vec<_>, _>>()?,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::events::{
        GROWING_UNIT_CAPACITY_CHANGED_EVENT_TYPE, GROWING_UNIT_CREATED_EVENT_TYPE,
        GROWING_UNIT_DELETED_EVENT_TYPE, GROWING_UNIT_NAME_CHANGED_EVENT_TYPE,
        GROWING_UNIT_TYPE_CHANGED_EVENT_TYPE, GROWING_UNIT_UPDATED_EVENT_TYPE,
        PLANT_ADDED_EVENT_TYPE, PLANT_REMOVED_EVENT_TYPE, PLANT_STATUS_CHANGED_EVENT_TYPE,
    };
    use crate::domain::value_objects::LengthUnit;
    use greenhouse_core::event::DomainEvent;
    use greenhouse_test_support::{FixedClock, fixed_now};

    fn props(capacity: u32) -> GrowingUnitProps {
        GrowingUnitProps {
            id: Uuid::new_v4(),
            location_id: Uuid::new_v4(),
            name: GrowingUnitName::new("Balcony pot").unwrap(),
            unit_type: GrowingUnitType::Pot,
            capacity: Capacity::from(capacity),
            dimensions: None,
            plants: Vec::new(),
        }
    }

    fn plant(status: PlantStatus) -> Plant {
        Plant::new(Uuid::new_v4(), None, None, None, None, status)
    }

    fn event_types(unit: &GrowingUnit) -> Vec<&'static str> {
        unit.uncommitted_events()
            .iter()
            .map(DomainEvent::event_type)
            .collect()
    }

    #[test]
    fn test_create_records_created_snapshot() {
        // Arrange
        let clock = FixedClock::default();
        let correlation_id = Uuid::new_v4();
        let ctx = EventContext::new(correlation_id, &clock);
        let props = props(3);
        let id = props.id;

        // Act
        let unit = GrowingUnit::create(props, &ctx);

        // Assert
        let events = unit.uncommitted_events();
        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.event_type(), GROWING_UNIT_CREATED_EVENT_TYPE);
        let meta = event.metadata();
        assert_eq!(meta.aggregate_id, id);
        assert_eq!(meta.aggregate_type, "growing_unit");
        assert_eq!(meta.correlation_id, correlation_id);
        assert_eq!(meta.occurred_at, fixed_now());
        match &event.kind {
            GrowingUnitEventKind::Created(snapshot) => {
                assert_eq!(snapshot, &unit.to_primitives());
            }
            other => panic!("expected Created, got {other:?}"),
        }
    }

    #[test]
    fn test_reconstitute_records_nothing() {
        let unit = GrowingUnit::reconstitute(props(3));

        assert!(unit.uncommitted_events().is_empty());
    }

    #[test]
    fn test_change_name_records_old_and_new_value() {
        // Arrange
        let clock = FixedClock::default();
        let ctx = EventContext::new(Uuid::new_v4(), &clock);
        let mut unit = GrowingUnit::reconstitute(props(3));

        // Act
        unit.change_name(GrowingUnitName::new("Herb box").unwrap(), &ctx, true);

        // Assert
        assert_eq!(unit.name().as_str(), "Herb box");
        match &unit.uncommitted_events()[0].kind {
            GrowingUnitEventKind::NameChanged(change) => {
                assert_eq!(change.id, unit.id());
                assert_eq!(change.old_value, "Balcony pot");
                assert_eq!(change.new_value, "Herb box");
            }
            other => panic!("expected NameChanged, got {other:?}"),
        }
    }

    #[test]
    fn test_suppressed_mutators_change_state_without_events() {
        // Arrange
        let clock = FixedClock::default();
        let ctx = EventContext::new(Uuid::new_v4(), &clock);
        let mut unit = GrowingUnit::reconstitute(props(3));
        let new_location = Uuid::new_v4();
        let dimensions = Dimensions::new(40.0, 40.0, 30.0, LengthUnit::Centimeters).unwrap();

        // Act
        unit.change_name(GrowingUnitName::new("Quiet").unwrap(), &ctx, false);
        unit.change_type(GrowingUnitType::WindowBox, &ctx, false);
        unit.change_capacity(Capacity::from(8), &ctx, false);
        unit.change_dimensions(dimensions, &ctx, false);
        unit.change_location(new_location, &ctx, false);
        unit.add_plant(plant(PlantStatus::Planted), &ctx, false);
        unit.delete(&ctx, false);

        // Assert
        assert!(unit.uncommitted_events().is_empty());
        assert_eq!(unit.name().as_str(), "Quiet");
        assert_eq!(unit.unit_type(), GrowingUnitType::WindowBox);
        assert_eq!(unit.capacity().value(), 8);
        assert_eq!(unit.dimensions(), Some(&dimensions));
        assert_eq!(unit.location_id(), new_location);
        assert_eq!(unit.plants().len(), 1);
    }

    #[test]
    fn test_update_emits_granular_events_in_call_order_then_snapshot() {
        // Arrange
        let clock = FixedClock::default();
        let ctx = EventContext::new(Uuid::new_v4(), &clock);
        let mut unit = GrowingUnit::reconstitute(props(3));
        let update = GrowingUnitUpdate {
            name: Some(GrowingUnitName::new("Renamed").unwrap()),
            unit_type: Some(GrowingUnitType::GardenBed),
            capacity: Some(Capacity::from(12)),
            ..GrowingUnitUpdate::default()
        };

        // Act
        unit.update(update, &ctx, true);

        // Assert
        assert_eq!(
            event_types(&unit),
            vec![
                GROWING_UNIT_NAME_CHANGED_EVENT_TYPE,
                GROWING_UNIT_TYPE_CHANGED_EVENT_TYPE,
                GROWING_UNIT_CAPACITY_CHANGED_EVENT_TYPE,
                GROWING_UNIT_UPDATED_EVENT_TYPE,
            ]
        );
        match &unit.uncommitted_events()[3].kind {
            GrowingUnitEventKind::Updated(snapshot) => {
                assert_eq!(snapshot.name, "Renamed");
                assert_eq!(snapshot.capacity, 12);
                assert_eq!(snapshot.unit_type, GrowingUnitType::GardenBed);
            }
            other => panic!("expected Updated, got {other:?}"),
        }
    }

    #[test]
    fn test_events_keep_mutator_call_order_through_delete() {
        let clock = FixedClock::default();
        let ctx = EventContext::new(Uuid::new_v4(), &clock);
        let mut unit = GrowingUnit::reconstitute(props(3));

        unit.change_capacity(Capacity::from(5), &ctx, true);
        unit.change_name(GrowingUnitName::new("Last days").unwrap(), &ctx, true);
        unit.delete(&ctx, true);

        assert_eq!(
            event_types(&unit),
            vec![
                GROWING_UNIT_CAPACITY_CHANGED_EVENT_TYPE,
                GROWING_UNIT_NAME_CHANGED_EVENT_TYPE,
                GROWING_UNIT_DELETED_EVENT_TYPE,
            ]
        );
    }

    #[test]
    fn test_empty_update_records_only_snapshot() {
        let clock = FixedClock::default();
        let ctx = EventContext::new(Uuid::new_v4(), &clock);
        let mut unit = GrowingUnit::reconstitute(props(3));

        unit.update(GrowingUnitUpdate::default(), &ctx, true);

        assert_eq!(event_types(&unit), vec![GROWING_UNIT_UPDATED_EVENT_TYPE]);
    }

    #[test]
    fn test_suppressed_update_records_nothing() {
        let clock = FixedClock::default();
        let ctx = EventContext::new(Uuid::new_v4(), &clock);
        let mut unit = GrowingUnit::reconstitute(props(3));
        let update = GrowingUnitUpdate {
            capacity: Some(Capacity::from(1)),
            ..GrowingUnitUpdate::default()
        };

        unit.update(update, &ctx, false);

        assert!(unit.uncommitted_events().is_empty());
        assert_eq!(unit.capacity().value(), 1);
    }

    #[test]
    fn test_add_plant_ignores_capacity() {
        // Arrange
        let clock = FixedClock::default();
        let ctx = EventContext::new(Uuid::new_v4(), &clock);
        let mut unit = GrowingUnit::reconstitute(props(1));
        unit.add_plant(plant(PlantStatus::Planted), &ctx, true);
        assert!(!unit.has_capacity());

        // Act
        unit.add_plant(plant(PlantStatus::Planted), &ctx, true);

        // Assert
        assert_eq!(unit.plants().len(), 2);
        assert_eq!(unit.remaining_capacity(), 0);
        assert_eq!(
            event_types(&unit),
            vec![PLANT_ADDED_EVENT_TYPE, PLANT_ADDED_EVENT_TYPE]
        );
    }

    #[test]
    fn test_remaining_capacity_counts_free_slots() {
        let clock = FixedClock::default();
        let ctx = EventContext::new(Uuid::new_v4(), &clock);
        let mut unit = GrowingUnit::reconstitute(props(3));

        unit.add_plant(plant(PlantStatus::Planted), &ctx, false);

        assert!(unit.has_capacity());
        assert_eq!(unit.remaining_capacity(), 2);
    }

    #[test]
    fn test_zero_capacity_unit_has_no_room() {
        let unit = GrowingUnit::reconstitute(props(0));

        assert!(!unit.has_capacity());
        assert_eq!(unit.remaining_capacity(), 0);
    }

    #[test]
    fn test_remove_plant_carries_pre_removal_snapshot() {
        // Arrange
        let clock = FixedClock::default();
        let ctx = EventContext::new(Uuid::new_v4(), &clock);
        let mut unit = GrowingUnit::reconstitute(props(3));
        let basil = plant(PlantStatus::Growing);
        let basil_id = basil.id();
        unit.add_plant(basil.clone(), &ctx, false);

        // Act
        unit.remove_plant(basil_id, &ctx, true).unwrap();

        // Assert
        assert!(unit.plant_by_id(basil_id).is_none());
        assert_eq!(event_types(&unit), vec![PLANT_REMOVED_EVENT_TYPE]);
        match &unit.uncommitted_events()[0].kind {
            GrowingUnitEventKind::PlantRemoved(payload) => {
                assert_eq!(payload.growing_unit_id, unit.id());
                assert_eq!(payload.plant, basil.to_primitives());
            }
            other => panic!("expected PlantRemoved, got {other:?}"),
        }
    }

    #[test]
    fn test_remove_unknown_plant_returns_validation_error() {
        // Arrange
        let clock = FixedClock::default();
        let ctx = EventContext::new(Uuid::new_v4(), &clock);
        let mut unit = GrowingUnit::reconstitute(props(3));

        // Act
        let result = unit.remove_plant(Uuid::new_v4(), &ctx, true);

        // Assert
        match result.unwrap_err() {
            DomainError::Validation(msg) => assert!(msg.contains("not found")),
            other => panic!("expected Validation, got {other:?}"),
        }
        assert!(unit.uncommitted_events().is_empty());
    }

    #[test]
    fn test_change_plant_status_records_old_and_new_status() {
        let clock = FixedClock::default();
        let ctx = EventContext::new(Uuid::new_v4(), &clock);
        let mut unit = GrowingUnit::reconstitute(props(3));
        let seedling = plant(PlantStatus::Planted);
        let seedling_id = seedling.id();
        unit.add_plant(seedling, &ctx, false);

        unit.change_plant_status(seedling_id, PlantStatus::Growing, &ctx, true);

        assert_eq!(
            unit.plant_by_id(seedling_id).unwrap().status(),
            PlantStatus::Growing
        );
        assert_eq!(event_types(&unit), vec![PLANT_STATUS_CHANGED_EVENT_TYPE]);
        match &unit.uncommitted_events()[0].kind {
            GrowingUnitEventKind::PlantStatusChanged(payload) => {
                assert_eq!(payload.plant_id, seedling_id);
                assert_eq!(payload.old_value, PlantStatus::Planted);
                assert_eq!(payload.new_value, PlantStatus::Growing);
            }
            other => panic!("expected PlantStatusChanged, got {other:?}"),
        }
    }

    #[test]
    fn test_change_status_of_unknown_plant_is_a_silent_no_op() {
        // Arrange
        let clock = FixedClock::default();
        let ctx = EventContext::new(Uuid::new_v4(), &clock);
        let mut unit = GrowingUnit::reconstitute(props(3));
        unit.add_plant(plant(PlantStatus::Planted), &ctx, false);
        let before = unit.to_primitives();

        // Act
        unit.change_plant_status(Uuid::new_v4(), PlantStatus::Dead, &ctx, true);

        // Assert
        assert_eq!(unit.to_primitives(), before);
        assert!(unit.uncommitted_events().is_empty());
    }

    #[test]
    fn test_delete_records_snapshot() {
        let clock = FixedClock::default();
        let ctx = EventContext::new(Uuid::new_v4(), &clock);
        let mut unit = GrowingUnit::reconstitute(props(3));
        let snapshot = unit.to_primitives();

        unit.delete(&ctx, true);

        assert_eq!(event_types(&unit), vec![GROWING_UNIT_DELETED_EVENT_TYPE]);
        assert_eq!(
            unit.uncommitted_events()[0].kind,
            GrowingUnitEventKind::Deleted(snapshot)
        );
    }

    #[test]
    fn test_primitives_round_trip_preserves_children() {
        // Arrange
        let clock = FixedClock::default();
        let ctx = EventContext::new(Uuid::new_v4(), &clock);
        let mut unit = GrowingUnit::reconstitute(GrowingUnitProps {
            dimensions: Some(Dimensions::new(1.0, 0.5, 0.4, LengthUnit::Meters).unwrap()),
            ..props(4)
        });
        unit.add_plant(plant(PlantStatus::Planted), &ctx, false);
        unit.add_plant(plant(PlantStatus::Harvested), &ctx, false);

        // Act
        let rebuilt = GrowingUnit::from_primitives(unit.to_primitives()).unwrap();

        // Assert
        assert_eq!(rebuilt.to_primitives(), unit.to_primitives());
        assert!(rebuilt.uncommitted_events().is_empty());
    }

    #[test]
    fn test_from_primitives_rejects_invalid_stored_name() {
        let mut primitives = GrowingUnit::reconstitute(props(1)).to_primitives();
        primitives.name = String::new();

        let result = GrowingUnit::from_primitives(primitives);

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_take_uncommitted_events_drains() {
        let clock = FixedClock::default();
        let ctx = EventContext::new(Uuid::new_v4(), &clock);
        let mut unit = GrowingUnit::create(props(2), &ctx);

        let drained = unit.take_uncommitted_events();

        assert_eq!(drained.len(), 1);
        assert!(unit.uncommitted_events().is_empty());
    }
}
