//! Shared application state.

use std::sync::Arc;

use greenhouse_core::bus::EventBus;
use greenhouse_core::clock::Clock;
use greenhouse_core::repository::{ReadRepository, WriteRepository};
use greenhouse_growing_unit::domain::aggregates::{GrowingUnit, GrowingUnitPrimitives};
use greenhouse_plant_species::domain::aggregates::{PlantSpecies, PlantSpeciesPrimitives};
use greenhouse_store::memory_repository::InMemoryRepository;
use greenhouse_store::pg_document_repository::PgDocumentRepository;
use sqlx::PgPool;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Time source stamped onto events.
    pub clock: Arc<dyn Clock>,
    /// Destination for committed events.
    pub event_bus: Arc<dyn EventBus>,
    /// Growing unit aggregates.
    pub growing_units: Arc<dyn WriteRepository<GrowingUnit>>,
    /// Growing unit read model.
    pub growing_unit_views: Arc<dyn ReadRepository<GrowingUnitPrimitives>>,
    /// Plant species aggregates.
    pub plant_species: Arc<dyn WriteRepository<PlantSpecies>>,
    /// Plant species read model.
    pub plant_species_views: Arc<dyn ReadRepository<PlantSpeciesPrimitives>>,
}

impl AppState {
    /// State backed by process-local repositories.
    #[must_use]
    pub fn in_memory(clock: Arc<dyn Clock>, event_bus: Arc<dyn EventBus>) -> Self {
        let growing_units = Arc::new(InMemoryRepository::<GrowingUnit>::new());
        let plant_species = Arc::new(InMemoryRepository::<PlantSpecies>::new());
        Self {
            clock,
            event_bus,
            growing_units: growing_units.clone(),
            growing_unit_views: growing_units,
            plant_species: plant_species.clone(),
            plant_species_views: plant_species,
        }
    }

    /// State backed by the `PostgreSQL` document table.
    #[must_use]
    pub fn postgres(pool: PgPool, clock: Arc<dyn Clock>, event_bus: Arc<dyn EventBus>) -> Self {
        let growing_units = Arc::new(PgDocumentRepository::<GrowingUnit>::new(pool.clone()));
        let plant_species = Arc::new(PgDocumentRepository::<PlantSpecies>::new(pool));
        Self {
            clock,
            event_bus,
            growing_units: growing_units.clone(),
            growing_unit_views: growing_units,
            plant_species: plant_species.clone(),
            plant_species_views: plant_species,
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
