//! Commands for the Growing Units context.
//!
//! Commands carry raw input; handlers turn it into value objects, so a
//! malformed command fails with `DomainError::Validation` before any state
//! changes.

use chrono::{DateTime, Utc};
use greenhouse_core::command::Command;
use greenhouse_core::tenant::TenantId;
use uuid::Uuid;

use super::value_objects::DimensionsPrimitives;

/// Command to create a growing unit.
#[derive(Debug, Clone)]
pub struct CreateGrowingUnit {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The owning tenant.
    pub tenant_id: TenantId,
    /// The location the unit sits in.
    pub location_id: Uuid,
    /// Display name.
    pub name: String,
    /// Container type, e.g. `POT`.
    pub unit_type: String,
    /// Maximum number of plants.
    pub capacity: i64,
    /// Physical size.
    pub dimensions: Option<DimensionsPrimitives>,
}

impl Command for CreateGrowingUnit {
    fn command_type(&self) -> &'static str {
        "growing_unit.create"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to change one or more fields of a growing unit.
#[derive(Debug, Clone)]
pub struct UpdateGrowingUnit {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The owning tenant.
    pub tenant_id: TenantId,
    /// The growing unit identifier.
    pub growing_unit_id: Uuid,
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

impl Command for UpdateGrowingUnit {
    fn command_type(&self) -> &'static str {
        "growing_unit.update"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to delete a growing unit.
#[derive(Debug, Clone)]
pub struct DeleteGrowingUnit {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The owning tenant.
    pub tenant_id: TenantId,
    /// The growing unit identifier.
    pub growing_unit_id: Uuid,
}

impl Command for DeleteGrowingUnit {
    fn command_type(&self) -> &'static str {
        "growing_unit.delete"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to put a new plant into a growing unit.
#[derive(Debug, Clone)]
pub struct AddPlantToGrowingUnit {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The owning tenant.
    pub tenant_id: TenantId,
    /// The growing unit identifier.
    pub growing_unit_id: Uuid,
    /// Species of the plant.
    pub species_id: Option<Uuid>,
    /// Nickname.
    pub name: Option<String>,
    /// When the plant went in.
    pub planted_date: Option<DateTime<Utc>>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Initial status; defaults to `PLANTED`.
    pub status: Option<String>,
}

impl Command for AddPlantToGrowingUnit {
    fn command_type(&self) -> &'static str {
        "growing_unit.add_plant"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to take a plant out of a growing unit.
#[derive(Debug, Clone)]
pub struct RemovePlantFromGrowingUnit {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The owning tenant.
    pub tenant_id: TenantId,
    /// The growing unit identifier.
    pub growing_unit_id: Uuid,
    /// The plant identifier.
    pub plant_id: Uuid,
}

impl Command for RemovePlantFromGrowingUnit {
    fn command_type(&self) -> &'static str {
        "growing_unit.remove_plant"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to change a plant's status.
#[derive(Debug, Clone)]
pub struct ChangePlantStatus {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The owning tenant.
    pub tenant_id: TenantId,
    /// The growing unit identifier.
    pub growing_unit_id: Uuid,
    /// The plant identifier.
    pub plant_id: Uuid,
    /// New status, e.g. `GROWING`.
    pub status: String,
}

impl Command for ChangePlantStatus {
    fn command_type(&self) -> &'static str {
        "growing_unit.change_plant_status"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
