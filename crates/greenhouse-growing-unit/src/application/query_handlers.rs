//! Query handlers for the Growing Units context.
//!
//! Queries read stored primitives directly and never rebuild aggregates.

use greenhouse_core::aggregate::AggregateRoot;
use greenhouse_core::criteria::Criteria;
use greenhouse_core::error::DomainError;
use greenhouse_core::pagination::PaginatedResult;
use greenhouse_core::repository::ReadRepository;
use greenhouse_core::tenant::TenantId;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::aggregates::{GrowingUnit, GrowingUnitPrimitives};

/// Read-only view of a growing unit with derived occupancy figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrowingUnitView {
    /// The stored state.
    #[serde(flatten)]
    pub unit: GrowingUnitPrimitives,
    /// Number of plants in the unit.
    pub plant_count: usize,
    /// Free slots left; zero when the unit is over capacity.
    pub remaining_capacity: u32,
}

impl From<GrowingUnitPrimitives> for GrowingUnitView {
    fn from(unit: GrowingUnitPrimitives) -> Self {
        let plant_count = unit.plants.len();
        let used = u32::try_from(plant_count).unwrap_or(u32::MAX);
        Self {
            remaining_capacity: unit.capacity.saturating_sub(used),
            plant_count,
            unit,
        }
    }
}

/// Retrieves a growing unit by id.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the tenant has no such unit, or the
/// repository's error if the lookup fails.
pub async fn get_growing_unit_by_id(
    tenant_id: TenantId,
    growing_unit_id: Uuid,
    repo: &dyn ReadRepository<GrowingUnitPrimitives>,
) -> Result<GrowingUnitView, DomainError> {
    repo.find_view_by_id(tenant_id, growing_unit_id)
        .await?
        .map(GrowingUnitView::from)
        .ok_or(DomainError::NotFound {
            aggregate_type: GrowingUnit::AGGREGATE_TYPE,
            id: growing_unit_id,
        })
}

/// Returns one page of growing units matching `criteria`.
///
/// # Errors
///
/// Returns the repository's error if the query fails.
pub async fn find_growing_units_by_criteria(
    tenant_id: TenantId,
    criteria: &Criteria,
    repo: &dyn ReadRepository<GrowingUnitPrimitives>,
) -> Result<PaginatedResult<GrowingUnitView>, DomainError> {
    let page = repo.find_by_criteria(tenant_id, criteria).await?;
    Ok(page.map(GrowingUnitView::from))
}
