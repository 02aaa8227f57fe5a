//! Aggregate roots for the Plant Species context.

use greenhouse_core::aggregate::{AggregateRoot, EventRecorder, Persistable};
use greenhouse_core::error::DomainError;
use greenhouse_core::event::{EventContext, EventMetadata, FieldChanged};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::events::{PlantSpeciesEvent, PlantSpeciesEventKind};
use super::value_objects::{
    CommonName, DaysToHarvest, Difficulty, GrowthRate, PhRange, PlantFamily, RangePrimitives,
    ScientificName, SpeciesCategory, TemperatureRange,
};

/// Plain form of a [`PlantSpecies`]; the stored document and read model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantSpeciesPrimitives {
    /// Aggregate identifier.
    pub id: Uuid,
    /// Everyday name.
    pub common_name: String,
    /// Binomial name.
    pub scientific_name: String,
    /// Botanical family.
    pub family: Option<String>,
    /// Broad grouping.
    pub category: SpeciesCategory,
    /// Care difficulty.
    pub difficulty: Difficulty,
    /// Growth rate.
    pub growth_rate: GrowthRate,
    /// Ideal temperature range in degrees Celsius.
    pub temperature_range: Option<RangePrimitives>,
    /// Soil pH range.
    pub ph_range: Option<RangePrimitives>,
    /// Days from planting to first harvest.
    pub days_to_harvest: Option<u32>,
}

/// Everything needed to build a [`PlantSpecies`].
#[derive(Debug, Clone)]
pub struct PlantSpeciesProps {
    /// Aggregate identifier.
    pub id: Uuid,
    /// Everyday name.
    pub common_name: CommonName,
    /// Binomial name.
    pub scientific_name: ScientificName,
    /// Botanical family.
    pub family: Option<PlantFamily>,
    /// Broad grouping.
    pub category: SpeciesCategory,
    /// Care difficulty.
    pub difficulty: Difficulty,
    /// Growth rate.
    pub growth_rate: GrowthRate,
    /// Ideal temperature range.
    pub temperature_range: Option<TemperatureRange>,
    /// Soil pH range.
    pub ph_range: Option<PhRange>,
    /// Days from planting to first harvest.
    pub days_to_harvest: Option<DaysToHarvest>,
}

/// Partial update of a species. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct PlantSpeciesUpdate {
    /// New common name.
    pub common_name: Option<CommonName>,
    /// New scientific name.
    pub scientific_name: Option<ScientificName>,
    /// New family; `Some(None)` clears it.
    pub family: Option<Option<PlantFamily>>,
    /// New category.
    pub category: Option<SpeciesCategory>,
    /// New difficulty.
    pub difficulty: Option<Difficulty>,
    /// New growth rate.
    pub growth_rate: Option<GrowthRate>,
    /// New temperature range; `Some(None)` clears it.
    pub temperature_range: Option<Option<TemperatureRange>>,
    /// New pH range; `Some(None)` clears it.
    pub ph_range: Option<Option<PhRange>>,
    /// New days to harvest; `Some(None)` clears it.
    pub days_to_harvest: Option<Option<DaysToHarvest>>,
}

/// The aggregate root for a catalogued plant species.
#[derive(Debug, Clone)]
pub struct PlantSpecies {
    id: Uuid,
    common_name: CommonName,
    scientific_name: ScientificName,
    family: Option<PlantFamily>,
    category: SpeciesCategory,
    difficulty: Difficulty,
    growth_rate: GrowthRate,
    temperature_range: Option<TemperatureRange>,
    ph_range: Option<PhRange>,
    days_to_harvest: Option<DaysToHarvest>,
    events: EventRecorder<PlantSpeciesEvent>,
}

impl PlantSpecies {
    /// Creates a new species and records `plant_species.created`.
    #[must_use]
    pub fn create(props: PlantSpeciesProps, ctx: &EventContext<'_>) -> Self {
        let mut species = Self::reconstitute(props);
        let snapshot = species.to_primitives();
        species.record(PlantSpeciesEventKind::Created(snapshot), ctx);
        species
    }

    /// Rebuilds a species from trusted state without recording events.
    #[must_use]
    pub fn reconstitute(props: PlantSpeciesProps) -> Self {
        Self {
            id: props.id,
            common_name: props.common_name,
            scientific_name: props.scientific_name,
            family: props.family,
            category: props.category,
            difficulty: props.difficulty,
            growth_rate: props.growth_rate,
            temperature_range: props.temperature_range,
            ph_range: props.ph_range,
            days_to_harvest: props.days_to_harvest,
            events: EventRecorder::new(),
        }
    }

    fn record(&mut self, kind: PlantSpeciesEventKind, ctx: &EventContext<'_>) {
        let event = PlantSpeciesEvent {
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

    /// Everyday name.
    #[must_use]
    pub fn common_name(&self) -> &CommonName {
        &self.common_name
    }

    /// Binomial name.
    #[must_use]
    pub fn scientific_name(&self) -> &ScientificName {
        &self.scientific_name
    }

    /// Botanical family.
    #[must_use]
    pub fn family(&self) -> Option<&PlantFamily> {
        self.family.as_ref()
    }

    /// Broad grouping.
    #[must_use]
    pub fn category(&self) -> SpeciesCategory {
        self.category
    }

    /// Care difficulty.
    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Growth rate.
    #[must_use]
    pub fn growth_rate(&self) -> GrowthRate {
        self.growth_rate
    }

    /// Ideal temperature range.
    #[must_use]
    pub fn temperature_range(&self) -> Option<&TemperatureRange> {
        self.temperature_range.as_ref()
    }

    /// Soil pH range.
    #[must_use]
    pub fn ph_range(&self) -> Option<&PhRange> {
        self.ph_range.as_ref()
    }

    /// Days from planting to first harvest.
    #[must_use]
    pub fn days_to_harvest(&self) -> Option<DaysToHarvest> {
        self.days_to_harvest
    }

    /// Changes the common name.
    pub fn change_common_name(
        &mut self,
        common_name: CommonName,
        ctx: &EventContext<'_>,
        emit_event: bool,
    ) {
        let old = std::mem::replace(&mut self.common_name, common_name);
        if emit_event {
            let change = FieldChanged::new(self.id, old.to_string(), self.common_name.to_string());
            self.record(PlantSpeciesEventKind::CommonNameChanged(change), ctx);
        }
    }

    /// Changes the scientific name.
    pub fn change_scientific_name(
        &mut self,
        scientific_name: ScientificName,
        ctx: &EventContext<'_>,
        emit_event: bool,
    ) {
        let old = std::mem::replace(&mut self.scientific_name, scientific_name);
        if emit_event {
            let change =
                FieldChanged::new(self.id, old.to_string(), self.scientific_name.to_string());
            self.record(PlantSpeciesEventKind::ScientificNameChanged(change), ctx);
        }
    }

    /// Sets or clears the family.
    pub fn change_family(
        &mut self,
        family: Option<PlantFamily>,
        ctx: &EventContext<'_>,
        emit_event: bool,
    ) {
        let old = std::mem::replace(&mut self.family, family);
        if emit_event {
            let change = FieldChanged::new(
                self.id,
                old.map(|f| f.as_str().to_owned()),
                self.family.as_ref().map(|f| f.as_str().to_owned()),
            );
            self.record(PlantSpeciesEventKind::FamilyChanged(change), ctx);
        }
    }

    /// Changes the category.
    pub fn change_category(
        &mut self,
        category: SpeciesCategory,
        ctx: &EventContext<'_>,
        emit_event: bool,
    ) {
        let old = std::mem::replace(&mut self.category, category);
        if emit_event {
            let change = FieldChanged::new(self.id, old, category);
            self.record(PlantSpeciesEventKind::CategoryChanged(change), ctx);
        }
    }

    /// Changes the difficulty.
    pub fn change_difficulty(
        &mut self,
        difficulty: Difficulty,
        ctx: &EventContext<'_>,
        emit_event: bool,
    ) {
        let old = std::mem::replace(&mut self.difficulty, difficulty);
        if emit_event {
            let change = FieldChanged::new(self.id, old, difficulty);
            self.record(PlantSpeciesEventKind::DifficultyChanged(change), ctx);
        }
    }

    /// Changes the growth rate.
    pub fn change_growth_rate(
        &mut self,
        growth_rate: GrowthRate,
        ctx: &EventContext<'_>,
        emit_event: bool,
    ) {
        let old = std::mem::replace(&mut self.growth_rate, growth_rate);
        if emit_event {
            let change = FieldChanged::new(self.id, old, growth_rate);
            self.record(PlantSpeciesEventKind::GrowthRateChanged(change), ctx);
        }
    }

    /// Sets or clears the temperature range.
    pub fn change_temperature_range(
        &mut self,
        range: Option<TemperatureRange>,
        ctx: &EventContext<'_>,
        emit_event: bool,
    ) {
        let old = std::mem::replace(&mut self.temperature_range, range);
        if emit_event {
            let change = FieldChanged::new(
                self.id,
                old.map(|r| r.to_primitives()),
                range.map(|r| r.to_primitives()),
            );
            self.record(PlantSpeciesEventKind::TemperatureRangeChanged(change), ctx);
        }
    }

    /// Sets or clears the pH range.
    pub fn change_ph_range(
        &mut self,
        range: Option<PhRange>,
        ctx: &EventContext<'_>,
        emit_event: bool,
    ) {
        let old = std::mem::replace(&mut self.ph_range, range);
        if emit_event {
            let change = FieldChanged::new(
                self.id,
                old.map(|r| r.to_primitives()),
                range.map(|r| r.to_primitives()),
            );
            self.record(PlantSpeciesEventKind::PhRangeChanged(change), ctx);
        }
    }

    /// Sets or clears the days to harvest.
    pub fn change_days_to_harvest(
        &mut self,
        days: Option<DaysToHarvest>,
        ctx: &EventContext<'_>,
        emit_event: bool,
    ) {
        let old = std::mem::replace(&mut self.days_to_harvest, days);
        if emit_event {
            let change = FieldChanged::new(
                self.id,
                old.map(DaysToHarvest::value),
                days.map(DaysToHarvest::value),
            );
            self.record(PlantSpeciesEventKind::DaysToHarvestChanged(change), ctx);
        }
    }

    /// Applies every present field through its own mutator, then records a
    /// `plant_species.updated` snapshot. A present `None` clears an optional
    /// field. With `emit_event` false nothing is recorded.
    pub fn update(&mut self, update: PlantSpeciesUpdate, ctx: &EventContext<'_>, emit_event: bool) {
        if let Some(common_name) = update.common_name {
            self.change_common_name(common_name, ctx, emit_event);
        }
        if let Some(scientific_name) = update.scientific_name {
            self.change_scientific_name(scientific_name, ctx, emit_event);
        }
        if let Some(family) = update.family {
            self.change_family(family, ctx, emit_event);
        }
        if let Some(category) = update.category {
            self.change_category(category, ctx, emit_event);
        }
        if let Some(difficulty) = update.difficulty {
            self.change_difficulty(difficulty, ctx, emit_event);
        }
        if let Some(growth_rate) = update.growth_rate {
            self.change_growth_rate(growth_rate, ctx, emit_event);
        }
        if let Some(range) = update.temperature_range {
            self.change_temperature_range(range, ctx, emit_event);
        }
        if let Some(range) = update.ph_range {
            self.change_ph_range(range, ctx, emit_event);
        }
        if let Some(days) = update.days_to_harvest {
            self.change_days_to_harvest(days, ctx, emit_event);
        }
        if emit_event {
            let snapshot = self.to_primitives();
            self.record(PlantSpeciesEventKind::Updated(snapshot), ctx);
        }
    }

    /// Records a `plant_species.deleted` snapshot.
    pub fn delete(&mut self, ctx: &EventContext<'_>, emit_event: bool) {
        if emit_event {
            let snapshot = self.to_primitives();
            self.record(PlantSpeciesEventKind::Deleted(snapshot), ctx);
        }
    }
}

impl AggregateRoot for PlantSpecies {
    type Event = PlantSpeciesEvent;

    const AGGREGATE_TYPE: &'static str = "plant_species";

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

impl Persistable for PlantSpecies {
    type Primitives = PlantSpeciesPrimitives;

    fn to_primitives(&self) -> PlantSpeciesPrimitives {
        PlantSpeciesPrimitives {
            id: self.id,
            common_name: self.common_name.to_string(),
            scientific_name: self.scientific_name.to_string(),
            family: self.family.as_ref().map(|f| f.as_str().to_owned()),
            category: self.category,
            difficulty: self.difficulty,
            growth_rate: self.growth_rate,
            temperature_range: self.temperature_range.map(|r| r.to_primitives()),
            ph_range: self.ph_range.map(|r| r.to_primitives()),
            days_to_harvest: self.days_to_harvest.map(DaysToHarvest::value),
        }
    }

    fn from_primitives(p: PlantSpeciesPrimitives) -> Result<Self, DomainError> {
        Ok(Self::reconstitute(PlantSpeciesProps {
            id: p.id,
            common_name: CommonName::new(&p.common_name)?,
            scientific_name: ScientificName::new(&p.scientific_name)?,
            family: p.family.map(PlantFamily::new).transpose()?,
            category: p.category,
            difficulty: p.difficulty,
            growth_rate: p.growth_rate,
            temperature_range: p.temperature_range.map(TemperatureRange::try_from).transpose()?,
            ph_range: p.ph_range.map(PhRange::try_from).transpose()?,
            days_to_harvest: p
                .days_to_harvest
                .map(|d| DaysToHarvest::new(i64::from(d)))
                .transpose()?,
        }))
    }
}
