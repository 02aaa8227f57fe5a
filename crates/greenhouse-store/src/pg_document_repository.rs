//! `PostgreSQL` implementation of the repository contracts.

use std::marker::PhantomData;

use async_trait::async_trait;
use greenhouse_core::aggregate::Persistable;
use greenhouse_core::criteria::{Criteria, CriteriaTranslator};
use greenhouse_core::error::DomainError;
use greenhouse_core::pagination::PaginatedResult;
use greenhouse_core::repository::{ReadRepository, WriteRepository};
use greenhouse_core::tenant::TenantId;
use serde_json::Value;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::debug;
use uuid::Uuid;

use crate::pg_translator::PgCriteriaTranslator;

/// PostgreSQL-backed document repository. Each aggregate type is stored in
/// the shared `documents` table under its aggregate type tag.
pub struct PgDocumentRepository<A> {
    pool: PgPool,
    _aggregate: PhantomData<fn() -> A>,
}

impl<A> Clone for PgDocumentRepository<A> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            _aggregate: PhantomData,
        }
    }
}

impl<A> std::fmt::Debug for PgDocumentRepository<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgDocumentRepository")
            .field("pool", &self.pool)
            .finish()
    }
}

impl<A: Persistable> PgDocumentRepository<A> {
    /// Creates a new `PgDocumentRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _aggregate: PhantomData,
        }
    }

    fn collection() -> &'static str {
        A::AGGREGATE_TYPE
    }

    async fn fetch_body(&self, tenant_id: TenantId, id: Uuid) -> Result<Option<Value>, DomainError> {
        let row: Option<Json<Value>> = sqlx::query_scalar(
            "SELECT body FROM documents WHERE tenant_id = $1 AND collection = $2 AND id = $3",
        )
        .bind(tenant_id.as_uuid())
        .bind(Self::collection())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(persistence)?;
        Ok(row.map(|Json(body)| body))
    }
}

fn persistence(err: sqlx::Error) -> DomainError {
    DomainError::Persistence(err.to_string())
}

fn decode<P: serde::de::DeserializeOwned>(body: Value) -> Result<P, DomainError> {
    serde_json::from_value(body)
        .map_err(|e| DomainError::Persistence(format!("document deserialization failed: {e}")))
}

fn push_scope<'a>(qb: &mut QueryBuilder<'a, Postgres>, tenant_id: TenantId, collection: &'a str) {
    qb.push(" WHERE tenant_id = ");
    qb.push_bind(tenant_id.as_uuid());
    qb.push(" AND collection = ");
    qb.push_bind(collection);
}

#[async_trait]
impl<A: Persistable> WriteRepository<A> for PgDocumentRepository<A> {
    async fn find_by_id(&self, tenant_id: TenantId, id: Uuid) -> Result<Option<A>, DomainError> {
        self.fetch_body(tenant_id, id)
            .await?
            .map(|body| decode::<A::Primitives>(body).and_then(A::from_primitives))
            .transpose()
    }

    async fn save(&self, tenant_id: TenantId, aggregate: &A) -> Result<(), DomainError> {
        let body = serde_json::to_value(aggregate.to_primitives())
            .map_err(|e| DomainError::Persistence(format!("document serialization failed: {e}")))?;
        sqlx::query(
            "INSERT INTO documents (tenant_id, collection, id, body) VALUES ($1, $2, $3, $4) \
             ON CONFLICT (tenant_id, collection, id) \
             DO UPDATE SET body = EXCLUDED.body, updated_at = NOW()",
        )
        .bind(tenant_id.as_uuid())
        .bind(Self::collection())
        .bind(aggregate.aggregate_id())
        .bind(Json(body))
        .execute(&self.pool)
        .await
        .map_err(persistence)?;
        Ok(())
    }

    async fn delete(&self, tenant_id: TenantId, id: Uuid) -> Result<(), DomainError> {
        let result = sqlx::query(
            "DELETE FROM documents WHERE tenant_id = $1 AND collection = $2 AND id = $3",
        )
        .bind(tenant_id.as_uuid())
        .bind(Self::collection())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(persistence)?;
        debug!(%id, rows = result.rows_affected(), "deleted document");
        Ok(())
    }
}

#[async_trait]
impl<A: Persistable> ReadRepository<A::Primitives> for PgDocumentRepository<A> {
    async fn find_by_criteria(
        &self,
        tenant_id: TenantId,
        criteria: &Criteria,
    ) -> Result<PaginatedResult<A::Primitives>, DomainError> {
        let query = PgCriteriaTranslator.translate(criteria)?;

        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM documents");
        push_scope(&mut count, tenant_id, Self::collection());
        query.filter.push_conditions(&mut count);
        let total: i64 = count
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(persistence)?;

        let mut page = QueryBuilder::<Postgres>::new("SELECT body FROM documents");
        push_scope(&mut page, tenant_id, Self::collection());
        query.filter.push_conditions(&mut page);
        query.sort.push_order_by(&mut page);
        page.push(" LIMIT ");
        page.push_bind(i64::try_from(query.limit).unwrap_or(i64::MAX));
        page.push(" OFFSET ");
        page.push_bind(i64::try_from(query.skip).unwrap_or(i64::MAX));
        let rows: Vec<Json<Value>> = page
            .build_query_scalar::<Json<Value>>()
            .fetch_all(&self.pool)
            .await
            .map_err(persistence)?;

        let items = rows
            .into_iter()
            .map(|Json(body)| decode(body))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PaginatedResult::new(
            items,
            u64::try_from(total).unwrap_or_default(),
            criteria.pagination(),
        ))
    }

    async fn find_view_by_id(
        &self,
        tenant_id: TenantId,
        id: Uuid,
    ) -> Result<Option<A::Primitives>, DomainError> {
        self.fetch_body(tenant_id, id)
            .await?
            .map(decode)
            .transpose()
    }
}
