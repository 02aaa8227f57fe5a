//! Repository contracts consumed by command and query handlers.

use std::marker::PhantomData;

use async_trait::async_trait;
use uuid::Uuid;

use crate::aggregate::AggregateRoot;
use crate::criteria::Criteria;
use crate::error::DomainError;
use crate::pagination::PaginatedResult;
use crate::tenant::TenantId;

/// Write-side repository for one aggregate type.
#[async_trait]
pub trait WriteRepository<A>: Send + Sync {
    /// Loads an aggregate, or `None` if the tenant has no such row.
    async fn find_by_id(&self, tenant_id: TenantId, id: Uuid) -> Result<Option<A>, DomainError>;

    /// Inserts or replaces the aggregate's current state.
    async fn save(&self, tenant_id: TenantId, aggregate: &A) -> Result<(), DomainError>;

    /// Removes a row. Deleting a missing id succeeds.
    async fn delete(&self, tenant_id: TenantId, id: Uuid) -> Result<(), DomainError>;
}

/// Read-side repository returning view models.
#[async_trait]
pub trait ReadRepository<V>: Send + Sync {
    /// Returns one page of view models matching the criteria.
    async fn find_by_criteria(
        &self,
        tenant_id: TenantId,
        criteria: &Criteria,
    ) -> Result<PaginatedResult<V>, DomainError>;

    /// Loads a single view model.
    async fn find_view_by_id(&self, tenant_id: TenantId, id: Uuid)
    -> Result<Option<V>, DomainError>;
}

/// Mandatory entry point for loading the aggregate a command mutates.
pub struct AssertExists<'r, A> {
    repo: &'r dyn WriteRepository<A>,
    _aggregate: PhantomData<fn() -> A>,
}

impl<'r, A: AggregateRoot> AssertExists<'r, A> {
    /// Wraps a write repository.
    #[must_use]
    pub fn new(repo: &'r dyn WriteRepository<A>) -> Self {
        Self {
            repo,
            _aggregate: PhantomData,
        }
    }

    /// Loads the aggregate or fails.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` if there is no such aggregate, or the
    /// repository's error if the lookup itself fails.
    pub async fn execute(&self, tenant_id: TenantId, id: Uuid) -> Result<A, DomainError> {
        self.repo
            .find_by_id(tenant_id, id)
            .await?
            .ok_or(DomainError::NotFound {
                aggregate_type: A::AGGREGATE_TYPE,
                id,
            })
    }
}
