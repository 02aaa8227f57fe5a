//! Event bus implementations.

use async_trait::async_trait;
use greenhouse_core::bus::EventBus;
use greenhouse_core::error::DomainError;
use greenhouse_core::event::EventEnvelope;
use tokio::sync::broadcast;
use tracing::info;

/// Writes every event to the log and delivers nothing else. Used when no
/// subscriber infrastructure is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventBus;

#[async_trait]
impl EventBus for TracingEventBus {
    async fn publish(&self, event: &EventEnvelope) -> Result<(), DomainError> {
        let meta = &event.metadata;
        info!(
            event_id = %meta.event_id,
            event_type = %meta.event_type,
            aggregate_type = %meta.aggregate_type,
            aggregate_id = %meta.aggregate_id,
            correlation_id = %meta.correlation_id,
            "domain event published"
        );
        Ok(())
    }
}

/// In-process fan-out over a `tokio::sync::broadcast` channel.
///
/// Publishing with no live subscriber is not an error; the event is
/// simply dropped.
#[derive(Debug, Clone)]
pub struct BroadcastEventBus {
    tx: broadcast::Sender<EventEnvelope>,
}

impl BroadcastEventBus {
    /// Creates a bus whose channel buffers up to `capacity` events per
    /// subscriber.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Subscribes to events published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.tx.subscribe()
    }
}

#[async_trait]
impl EventBus for BroadcastEventBus {
    async fn publish(&self, event: &EventEnvelope) -> Result<(), DomainError> {
        // `send` only fails when there are no receivers.
        let _ = self.tx.send(event.clone());
        Ok(())
    }
}
