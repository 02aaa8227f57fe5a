//! Request extractors for per-request context carried in headers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use greenhouse_core::error::DomainError;
use greenhouse_core::tenant::TenantId;
use uuid::Uuid;

use crate::error::ApiError;

/// Header naming the tenant that owns the request.
pub const TENANT_HEADER: &str = "x-tenant-id";

/// Header carrying a caller-supplied correlation id.
pub const CORRELATION_HEADER: &str = "x-correlation-id";

/// The tenant resolved from the `x-tenant-id` header.
#[derive(Debug, Clone, Copy)]
pub struct Tenant(pub TenantId);

impl<S: Send + Sync> FromRequestParts<S> for Tenant {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(TENANT_HEADER)
            .ok_or_else(|| DomainError::validation(format!("missing {TENANT_HEADER} header")))?;
        let id = raw
            .to_str()
            .ok()
            .and_then(|s| Uuid::parse_str(s.trim()).ok())
            .ok_or_else(|| {
                DomainError::validation(format!("{TENANT_HEADER} header must be a UUID"))
            })?;
        Ok(Self(TenantId::new(id)))
    }
}

/// Correlation id from `x-correlation-id`, or a fresh one when the header
/// is absent or unparsable.
#[derive(Debug, Clone, Copy)]
pub struct CorrelationId(pub Uuid);

impl<S: Send + Sync> FromRequestParts<S> for CorrelationId {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .get(CORRELATION_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| Uuid::parse_str(s.trim()).ok())
            .unwrap_or_else(Uuid::new_v4);
        Ok(Self(id))
    }
}
