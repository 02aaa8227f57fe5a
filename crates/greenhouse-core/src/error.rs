//! Domain error types.

use thiserror::Error;
use uuid::Uuid;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// An aggregate was not found for the given identifier.
    #[error("{aggregate_type} not found: {id}")]
    NotFound {
        /// The kind of aggregate that was looked up.
        aggregate_type: &'static str,
        /// The identifier that had no matching row.
        id: Uuid,
    },

    /// A value object rejected its input, or a mutation was refused.
    #[error("validation error: {0}")]
    Validation(String),

    /// A criteria filter named an operator no translator understands.
    #[error("invalid filter operator: {0}")]
    InvalidFilterOperator(String),

    /// A repository I/O failure.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// An event bus failure.
    #[error("publish error: {0}")]
    Publish(String),
}

impl DomainError {
    /// Shorthand for building a `Validation` error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
