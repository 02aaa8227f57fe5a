//! Test repositories — `WriteRepository` implementations for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use greenhouse_core::aggregate::AggregateRoot;
use greenhouse_core::error::DomainError;
use greenhouse_core::repository::WriteRepository;
use greenhouse_core::tenant::TenantId;
use uuid::Uuid;

use crate::call_log::CallLog;

/// A write repository that keeps clones of saved aggregates in memory and
/// records every call into a [`CallLog`].
///
/// Aggregates come back from `find_by_id` with no pending events, the same
/// way a real repository reconstructs them from storage.
#[derive(Debug)]
pub struct RecordingRepository<A> {
    rows: Mutex<HashMap<(TenantId, Uuid), A>>,
    log: CallLog,
    fail_writes: bool,
}

impl<A: AggregateRoot + Clone> RecordingRepository<A> {
    /// Creates an empty repository writing to `log`.
    #[must_use]
    pub fn new(log: CallLog) -> Self {
        Self {
            rows: Mutex::new(HashMap::new()),
            log,
            fail_writes: false,
        }
    }

    /// Creates a repository whose `save` and `delete` always fail with
    /// `DomainError::Persistence`. Lookups still work, and failed writes
    /// are still logged.
    #[must_use]
    pub fn with_failing_writes(log: CallLog) -> Self {
        Self {
            fail_writes: true,
            ..Self::new(log)
        }
    }

    /// Seeds a row without logging a call.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn insert(&self, tenant_id: TenantId, aggregate: &A) {
        let mut copy = aggregate.clone();
        copy.clear_events();
        self.rows
            .lock()
            .unwrap()
            .insert((tenant_id, copy.aggregate_id()), copy);
    }

    /// Returns the stored row, if any.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn get(&self, tenant_id: TenantId, id: Uuid) -> Option<A> {
        self.rows.lock().unwrap().get(&(tenant_id, id)).cloned()
    }

    /// Number of stored rows across all tenants.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    /// Whether no rows are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl<A: AggregateRoot + Clone> WriteRepository<A> for RecordingRepository<A> {
    async fn find_by_id(&self, tenant_id: TenantId, id: Uuid) -> Result<Option<A>, DomainError> {
        self.log.record("find_by_id");
        Ok(self.get(tenant_id, id))
    }

    async fn save(&self, tenant_id: TenantId, aggregate: &A) -> Result<(), DomainError> {
        self.log.record("save");
        if self.fail_writes {
            return Err(DomainError::Persistence("connection refused".into()));
        }
        self.insert(tenant_id, aggregate);
        Ok(())
    }

    async fn delete(&self, tenant_id: TenantId, id: Uuid) -> Result<(), DomainError> {
        self.log.record("delete");
        if self.fail_writes {
            return Err(DomainError::Persistence("connection refused".into()));
        }
        self.rows.lock().unwrap().remove(&(tenant_id, id));
        Ok(())
    }
}

/// A write repository that always returns a persistence error. Useful for
/// testing error-handling paths.
#[derive(Debug)]
pub struct FailingRepository;

#[async_trait]
impl<A: Send + Sync + 'static> WriteRepository<A> for FailingRepository {
    async fn find_by_id(&self, _tenant_id: TenantId, _id: Uuid) -> Result<Option<A>, DomainError> {
        Err(DomainError::Persistence("connection refused".into()))
    }

    async fn save(&self, _tenant_id: TenantId, _aggregate: &A) -> Result<(), DomainError> {
        Err(DomainError::Persistence("connection refused".into()))
    }

    async fn delete(&self, _tenant_id: TenantId, _id: Uuid) -> Result<(), DomainError> {
        Err(DomainError::Persistence("connection refused".into()))
    }
}
