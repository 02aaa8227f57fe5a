//! Query handlers for the Plant Species context.

use greenhouse_core::aggregate::AggregateRoot;
use greenhouse_core::criteria::Criteria;
use greenhouse_core::error::DomainError;
use greenhouse_core::pagination::PaginatedResult;
use greenhouse_core::repository::ReadRepository;
use greenhouse_core::tenant::TenantId;
use uuid::Uuid;

use crate::domain::aggregates::{PlantSpecies, PlantSpeciesPrimitives};

/// Retrieves a species by id.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the tenant has no such species, or
/// the repository's error if the lookup fails.
pub async fn get_plant_species_by_id(
    tenant_id: TenantId,
    species_id: Uuid,
    repo: &dyn ReadRepository<PlantSpeciesPrimitives>,
) -> Result<PlantSpeciesPrimitives, DomainError> {
    repo.find_view_by_id(tenant_id, species_id)
        .await?
        .ok_or(DomainError::NotFound {
            aggregate_type: PlantSpecies::AGGREGATE_TYPE,
            id: species_id,
        })
}

/// Returns one page of species matching `criteria`.
///
/// # Errors
///
/// Returns the repository's error if the query fails.
pub async fn find_plant_species_by_criteria(
    tenant_id: TenantId,
    criteria: &Criteria,
    repo: &dyn ReadRepository<PlantSpeciesPrimitives>,
) -> Result<PaginatedResult<PlantSpeciesPrimitives>, DomainError> {
    repo.find_by_criteria(tenant_id, criteria).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregates::PlantSpeciesProps;
    use crate::domain::value_objects::{
        CommonName, Difficulty, GrowthRate, ScientificName, SpeciesCategory,
    };
    use greenhouse_core::criteria::{Filter, FilterOperator, Sort, SortDirection};
    use greenhouse_core::repository::WriteRepository;
    use greenhouse_store::memory_repository::InMemoryRepository;

    fn species(common: &str, scientific: &str, category: SpeciesCategory) -> PlantSpecies {
        PlantSpecies::reconstitute(PlantSpeciesProps {
            id: Uuid::new_v4(),
            common_name: CommonName::new(common).unwrap(),
            scientific_name: ScientificName::new(scientific).unwrap(),
            family: None,
            category,
            difficulty: Difficulty::Easy,
            growth_rate: GrowthRate::Medium,
            temperature_range: None,
            ph_range: None,
            days_to_harvest: None,
        })
    }

    async fn seeded(tenant_id: TenantId) -> InMemoryRepository<PlantSpecies> {
        let repo = InMemoryRepository::new();
        for s in [
            species("Sweet basil", "Ocimum basilicum", SpeciesCategory::Herb),
            species("Tomato", "Solanum lycopersicum", SpeciesCategory::Vegetable),
            species("Thai basil", "Ocimum thyrsiflora", SpeciesCategory::Herb),
        ] {
            repo.save(tenant_id, &s).await.unwrap();
        }
        repo
    }

    #[tokio::test]
    async fn test_get_by_id_returns_primitives() {
        let tenant_id = TenantId::new(Uuid::new_v4());
        let repo = InMemoryRepository::<PlantSpecies>::new();
        let aloe = species("Aloe", "Aloe vera", SpeciesCategory::Succulent);
        repo.save(tenant_id, &aloe).await.unwrap();

        let found = get_plant_species_by_id(tenant_id, aloe.id(), &repo).await.unwrap();

        assert_eq!(found.common_name, "Aloe");
        assert_eq!(found.category, SpeciesCategory::Succulent);
    }

    #[tokio::test]
    async fn test_get_by_id_missing_is_not_found() {
        let repo = InMemoryRepository::<PlantSpecies>::new();

        let result = get_plant_species_by_id(TenantId::new(Uuid::new_v4()), Uuid::new_v4(), &repo).await;

        assert!(matches!(
            result,
            Err(DomainError::NotFound { aggregate_type: "plant_species", .. })
        ));
    }

    #[tokio::test]
    async fn test_find_by_criteria_like_is_case_insensitive() {
        // Arrange
        let tenant_id = TenantId::new(Uuid::new_v4());
        let repo = seeded(tenant_id).await;
        let criteria = Criteria::default()
            .with_filter(Filter::new("common_name", FilterOperator::Like, "BASIL").unwrap())
            .with_sort(Sort::new("common_name", SortDirection::Desc).unwrap());

        // Act
        let page = find_plant_species_by_criteria(tenant_id, &criteria, &repo)
            .await
            .unwrap();

        // Assert
        assert_eq!(page.total, 2);
        let names: Vec<&str> = page.items.iter().map(|s| s.common_name.as_str()).collect();
        assert_eq!(names, vec!["Thai basil", "Sweet basil"]);
    }

    #[tokio::test]
    async fn test_find_by_criteria_on_category() {
        let tenant_id = TenantId::new(Uuid::new_v4());
        let repo = seeded(tenant_id).await;
        let criteria = Criteria::default()
            .with_filter(Filter::new("category", FilterOperator::NotEquals, "HERB").unwrap());

        let page = find_plant_species_by_criteria(tenant_id, &criteria, &repo)
            .await
            .unwrap();

        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].scientific_name, "Solanum lycopersicum");
    }
}
