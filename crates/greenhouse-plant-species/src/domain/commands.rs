//! Commands for the Plant Species context.

use greenhouse_core::command::Command;
use greenhouse_core::tenant::TenantId;
use uuid::Uuid;

use super::value_objects::RangePrimitives;

/// Command to add a species to the catalogue.
#[derive(Debug, Clone)]
pub struct CreatePlantSpecies {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The owning tenant.
    pub tenant_id: TenantId,
    /// Everyday name.
    pub common_name: String,
    /// Binomial name.
    pub scientific_name: String,
    /// Botanical family.
    pub family: Option<String>,
    /// Category, e.g. `HERB`.
    pub category: String,
    /// Difficulty; defaults to `MEDIUM`.
    pub difficulty: Option<String>,
    /// Growth rate; defaults to `MEDIUM`.
    pub growth_rate: Option<String>,
    /// Ideal temperature range in degrees Celsius.
    pub temperature_range: Option<RangePrimitives>,
    /// Soil pH range.
    pub ph_range: Option<RangePrimitives>,
    /// Days from planting to first harvest.
    pub days_to_harvest: Option<i64>,
}

impl Command for CreatePlantSpecies {
    fn command_type(&self) -> &'static str {
        "plant_species.create"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to change one or more fields of a species.
#[derive(Debug, Clone)]
pub struct UpdatePlantSpecies {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The owning tenant.
    pub tenant_id: TenantId,
    /// The species identifier.
    pub species_id: Uuid,
    /// New everyday name.
    pub common_name: Option<String>,
    /// New binomial name.
    pub scientific_name: Option<String>,
    /// New family; `Some(None)` clears it.
    pub family: Option<Option<String>>,
    /// New category.
    pub category: Option<String>,
    /// New difficulty.
    pub difficulty: Option<String>,
    /// New growth rate.
    pub growth_rate: Option<String>,
    /// New temperature range; `Some(None)` clears it.
    pub temperature_range: Option<Option<RangePrimitives>>,
    /// New pH range; `Some(None)` clears it.
    pub ph_range: Option<Option<RangePrimitives>>,
    /// New days to harvest; `Some(None)` clears it.
    pub days_to_harvest: Option<Option<i64>>,
}

impl Command for UpdatePlantSpecies {
    fn command_type(&self) -> &'static str {
        "plant_species.update"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to remove a species from the catalogue.
#[derive(Debug, Clone)]
pub struct DeletePlantSpecies {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The owning tenant.
    pub tenant_id: TenantId,
    /// The species identifier.
    pub species_id: Uuid,
}

impl Command for DeletePlantSpecies {
    fn command_type(&self) -> &'static str {
        "plant_species.delete"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
