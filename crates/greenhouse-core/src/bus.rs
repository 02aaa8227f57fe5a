//! Event bus contract.

use async_trait::async_trait;

use crate::error::DomainError;
use crate::event::EventEnvelope;

/// Delivers event envelopes to subscribers. Each call is attempted once;
/// no delivery guarantee beyond that is assumed.
#[async_trait]
pub trait EventBus: Send + Sync {
    /// Publishes a single event.
    async fn publish(&self, event: &EventEnvelope) -> Result<(), DomainError>;

    /// Publishes a batch, preserving order.
    async fn publish_all(&self, events: &[EventEnvelope]) -> Result<(), DomainError> {
        for event in events {
            self.publish(event).await?;
        }
        Ok(())
    }
}
