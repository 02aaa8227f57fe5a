//! In-memory document repository.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use greenhouse_core::aggregate::Persistable;
use greenhouse_core::criteria::{Criteria, CriteriaTranslator};
use greenhouse_core::error::DomainError;
use greenhouse_core::pagination::PaginatedResult;
use greenhouse_core::repository::{ReadRepository, WriteRepository};
use greenhouse_core::tenant::TenantId;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::memory_translator::MemoryCriteriaTranslator;

#[derive(Debug, Clone)]
struct StoredDocument {
    tenant_id: TenantId,
    id: Uuid,
    body: Value,
}

/// Keeps each aggregate's primitives as a JSON document in insertion
/// order, which is the natural order for unsorted queries.
///
/// Implements both the write and the read contract for `A`.
pub struct InMemoryRepository<A> {
    documents: Arc<RwLock<Vec<StoredDocument>>>,
    _aggregate: PhantomData<fn() -> A>,
}

impl<A> Clone for InMemoryRepository<A> {
    fn clone(&self) -> Self {
        Self {
            documents: Arc::clone(&self.documents),
            _aggregate: PhantomData,
        }
    }
}

impl<A> Default for InMemoryRepository<A> {
    fn default() -> Self {
        Self {
            documents: Arc::new(RwLock::new(Vec::new())),
            _aggregate: PhantomData,
        }
    }
}

impl<A> std::fmt::Debug for InMemoryRepository<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryRepository").finish_non_exhaustive()
    }
}

impl<A: Persistable> InMemoryRepository<A> {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents across all tenants.
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    /// Whether no documents are stored.
    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

fn to_document<A: Persistable>(aggregate: &A) -> Result<Value, DomainError> {
    serde_json::to_value(aggregate.to_primitives())
        .map_err(|e| DomainError::Persistence(format!("document serialization failed: {e}")))
}

fn to_primitives<A: Persistable>(body: &Value) -> Result<A::Primitives, DomainError> {
    serde_json::from_value(body.clone())
        .map_err(|e| DomainError::Persistence(format!("document deserialization failed: {e}")))
}

#[async_trait]
impl<A: Persistable> WriteRepository<A> for InMemoryRepository<A> {
    async fn find_by_id(&self, tenant_id: TenantId, id: Uuid) -> Result<Option<A>, DomainError> {
        let documents = self.documents.read().await;
        documents
            .iter()
            .find(|d| d.tenant_id == tenant_id && d.id == id)
            .map(|d| to_primitives::<A>(&d.body).and_then(A::from_primitives))
            .transpose()
    }

    async fn save(&self, tenant_id: TenantId, aggregate: &A) -> Result<(), DomainError> {
        let id = aggregate.aggregate_id();
        let body = to_document(aggregate)?;
        let mut documents = self.documents.write().await;
        match documents
            .iter_mut()
            .find(|d| d.tenant_id == tenant_id && d.id == id)
        {
            Some(existing) => existing.body = body,
            None => documents.push(StoredDocument {
                tenant_id,
                id,
                body,
            }),
        }
        Ok(())
    }

    async fn delete(&self, tenant_id: TenantId, id: Uuid) -> Result<(), DomainError> {
        self.documents
            .write()
            .await
            .retain(|d| !(d.tenant_id == tenant_id && d.id == id));
        Ok(())
    }
}

#[async_trait]
impl<A: Persistable> ReadRepository<A::Primitives> for InMemoryRepository<A> {
    async fn find_by_criteria(
        &self,
        tenant_id: TenantId,
        criteria: &Criteria,
    ) -> Result<PaginatedResult<A::Primitives>, DomainError> {
        let query = MemoryCriteriaTranslator.translate(criteria)?;
        let documents = self.documents.read().await;

        let mut matching: Vec<&Value> = documents
            .iter()
            .filter(|d| d.tenant_id == tenant_id)
            .map(|d| &d.body)
            .filter(|body| query.filter.matches(body))
            .collect();
        if !query.sort.is_empty() {
            // `sort_by` is stable, so ties keep insertion order.
            matching.sort_by(|a, b| query.sort.compare(a, b));
        }

        let total = matching.len() as u64;
        let skip = usize::try_from(query.skip).unwrap_or(usize::MAX);
        let limit = usize::try_from(query.limit).unwrap_or(usize::MAX);
        let items = matching
            .into_iter()
            .skip(skip)
            .take(limit)
            .map(to_primitives::<A>)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PaginatedResult::new(items, total, criteria.pagination()))
    }

    async fn find_view_by_id(
        &self,
        tenant_id: TenantId,
        id: Uuid,
    ) -> Result<Option<A::Primitives>, DomainError> {
        let documents = self.documents.read().await;
        documents
            .iter()
            .find(|d| d.tenant_id == tenant_id && d.id == id)
            .map(|d| to_primitives::<A>(&d.body))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use greenhouse_core::aggregate::AggregateRoot;
    use greenhouse_core::criteria::{Filter, FilterOperator, Pagination, Sort, SortDirection};
    use greenhouse_core::pagination::expected_page_len;

    use super::*;
    use crate::fixtures::{Label, LabelPrimitives};

    fn tenant() -> TenantId {
        TenantId::new(Uuid::new_v4())
    }

    async fn seeded(tenant_id: TenantId, count: i64) -> InMemoryRepository<Label> {
        let repo = InMemoryRepository::new();
        for rank in 0..count {
            repo.save(tenant_id, &Label::new("GROWING", rank)).await.unwrap();
        }
        repo
    }

    #[tokio::test]
    async fn test_save_then_find_by_id_round_trips_state() {
        // Arrange
        let repo = InMemoryRepository::<Label>::new();
        let tenant_id = tenant();
        let label = Label::new("PLANTED", 3);

        // Act
        repo.save(tenant_id, &label).await.unwrap();
        let found = WriteRepository::find_by_id(&repo, tenant_id, label.state.id)
            .await
            .unwrap();

        // Assert
        let found = found.unwrap();
        assert_eq!(found.state, label.state);
        assert!(found.uncommitted_events().is_empty());
    }

    #[tokio::test]
    async fn test_save_is_an_upsert_that_keeps_position() {
        let repo = InMemoryRepository::<Label>::new();
        let tenant_id = tenant();
        let mut first = Label::new("PLANTED", 1);
        let second = Label::new("PLANTED", 2);
        repo.save(tenant_id, &first).await.unwrap();
        repo.save(tenant_id, &second).await.unwrap();

        first.state.rank = 9;
        repo.save(tenant_id, &first).await.unwrap();

        let page = repo
            .find_by_criteria(tenant_id, &Criteria::default())
            .await
            .unwrap();
        assert_eq!(repo.len().await, 2);
        assert_eq!(page.items[0].rank, 9);
        assert_eq!(page.items[1].rank, 2);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let tenant_id = tenant();
        let repo = seeded(tenant_id, 1).await;

        repo.delete(tenant_id, Uuid::new_v4()).await.unwrap();

        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_rows_are_scoped_by_tenant() {
        let owner = tenant();
        let repo = seeded(owner, 3).await;

        let other = repo.find_by_criteria(tenant(), &Criteria::default()).await.unwrap();

        assert_eq!(other.total, 0);
        assert!(other.items.is_empty());
    }

    #[tokio::test]
    async fn test_default_criteria_returns_first_ten_in_insertion_order() {
        let tenant_id = tenant();
        let repo = seeded(tenant_id, 12).await;

        let page = repo
            .find_by_criteria(tenant_id, &Criteria::default())
            .await
            .unwrap();

        assert_eq!(page.total, 12);
        assert_eq!(page.items.len(), 10);
        let ranks: Vec<i64> = page.items.iter().map(|l| l.rank).collect();
        assert_eq!(ranks, (0..10).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_last_partial_page() {
        // Arrange
        let tenant_id = tenant();
        let repo = seeded(tenant_id, 25).await;
        let pagination = Pagination::new(3, 10).unwrap();
        let criteria = Criteria::default().with_pagination(pagination);

        // Act
        let page = repo.find_by_criteria(tenant_id, &criteria).await.unwrap();

        // Assert
        assert_eq!(page.items.len(), 5);
        assert_eq!(page.items.len() as u64, expected_page_len(25, &pagination));
        assert_eq!(page.total_pages(), 3);
        assert_eq!(page.items[0].rank, 20);
    }

    #[tokio::test]
    async fn test_empty_store_returns_zero_pages() {
        let repo = InMemoryRepository::<Label>::new();

        let page = repo.find_by_criteria(tenant(), &Criteria::default()).await.unwrap();

        assert_eq!(page.total, 0);
        assert_eq!(page.total_pages(), 0);
        assert!(page.items.is_empty());
    }

    #[tokio::test]
    async fn test_filter_total_ignores_pagination() {
        // Arrange
        let tenant_id = tenant();
        let repo = seeded(tenant_id, 4).await;
        repo.save(tenant_id, &Label::new("PLANTED", 100)).await.unwrap();
        repo.save(tenant_id, &Label::new("PLANTED", 101)).await.unwrap();
        let criteria = Criteria::default()
            .with_filter(Filter::new("status", FilterOperator::Equals, "PLANTED").unwrap())
            .with_pagination(Pagination::new(1, 1).unwrap());

        // Act
        let page = repo.find_by_criteria(tenant_id, &criteria).await.unwrap();

        // Assert
        assert_eq!(page.total, 2);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].rank, 100);
    }

    #[tokio::test]
    async fn test_equals_filter_on_status_counts_only_matching_rows() {
        let tenant_id = tenant();
        let repo = InMemoryRepository::<Label>::new();
        repo.save(tenant_id, &Label::new("PLANTED", 1)).await.unwrap();
        repo.save(tenant_id, &Label::new("GROWING", 2)).await.unwrap();
        let criteria = Criteria::default()
            .with_filter(Filter::new("status", FilterOperator::Equals, "PLANTED").unwrap());

        let page = repo.find_by_criteria(tenant_id, &criteria).await.unwrap();

        assert_eq!(page.total, 1);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].status, "PLANTED");
    }

    #[tokio::test]
    async fn test_sort_is_applied_before_pagination() {
        let tenant_id = tenant();
        let repo = seeded(tenant_id, 5).await;
        let criteria = Criteria::default()
            .with_sort(Sort::new("rank", SortDirection::Desc).unwrap())
            .with_pagination(Pagination::new(1, 2).unwrap());

        let page = repo.find_by_criteria(tenant_id, &criteria).await.unwrap();

        let ranks: Vec<i64> = page.items.iter().map(|l| l.rank).collect();
        assert_eq!(ranks, vec![4, 3]);
    }

    #[tokio::test]
    async fn test_corrupt_document_surfaces_as_persistence_error() {
        let tenant_id = tenant();
        let repo = InMemoryRepository::<Label>::new();
        let id = Uuid::new_v4();
        repo.documents.write().await.push(StoredDocument {
            tenant_id,
            id,
            body: serde_json::json!({ "id": id, "status": 7 }),
        });

        let result = WriteRepository::find_by_id(&repo, tenant_id, id).await;

        assert!(matches!(result, Err(DomainError::Persistence(_))));
    }

    #[tokio::test]
    async fn test_invalid_stored_state_surfaces_as_validation_error() {
        let tenant_id = tenant();
        let repo = InMemoryRepository::<Label>::new();
        let id = Uuid::new_v4();
        let body = serde_json::to_value(LabelPrimitives {
            id,
            status: "PLANTED".into(),
            rank: -1,
            note: None,
        })
        .unwrap();
        repo.documents.write().await.push(StoredDocument { tenant_id, id, body });

        let result = WriteRepository::find_by_id(&repo, tenant_id, id).await;

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }
}
