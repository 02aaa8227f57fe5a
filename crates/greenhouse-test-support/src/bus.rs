//! Test event buses — `EventBus` implementations for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use greenhouse_core::bus::EventBus;
use greenhouse_core::error::DomainError;
use greenhouse_core::event::EventEnvelope;

use crate::call_log::CallLog;

/// An event bus that records every published batch and logs the call on
/// entry.
#[derive(Debug, Default)]
pub struct RecordingEventBus {
    batches: Mutex<Vec<Vec<EventEnvelope>>>,
    log: CallLog,
}

impl RecordingEventBus {
    /// Creates a bus writing to `log`.
    #[must_use]
    pub fn new(log: CallLog) -> Self {
        Self {
            batches: Mutex::new(Vec::new()),
            log,
        }
    }

    /// All published batches, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn batches(&self) -> Vec<Vec<EventEnvelope>> {
        self.batches.lock().unwrap().clone()
    }

    /// All published events, flattened.
    #[must_use]
    pub fn events(&self) -> Vec<EventEnvelope> {
        self.batches().into_iter().flatten().collect()
    }

    /// Event type tags of all published events, flattened.
    #[must_use]
    pub fn event_types(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .map(|e| e.metadata.event_type)
            .collect()
    }
}

#[async_trait]
impl EventBus for RecordingEventBus {
    async fn publish(&self, event: &EventEnvelope) -> Result<(), DomainError> {
        self.log.record("publish");
        self.batches.lock().unwrap().push(vec![event.clone()]);
        Ok(())
    }

    async fn publish_all(&self, events: &[EventEnvelope]) -> Result<(), DomainError> {
        self.log.record("publish_all");
        self.batches.lock().unwrap().push(events.to_vec());
        Ok(())
    }
}

/// An event bus that always fails, logging the attempt first.
#[derive(Debug, Default)]
pub struct FailingEventBus {
    log: CallLog,
}

impl FailingEventBus {
    /// Creates a failing bus writing to `log`.
    #[must_use]
    pub fn new(log: CallLog) -> Self {
        Self { log }
    }
}

#[async_trait]
impl EventBus for FailingEventBus {
    async fn publish(&self, _event: &EventEnvelope) -> Result<(), DomainError> {
        self.log.record("publish");
        Err(DomainError::Publish("broker unreachable".into()))
    }

    async fn publish_all(&self, _events: &[EventEnvelope]) -> Result<(), DomainError> {
        self.log.record("publish_all");
        Err(DomainError::Publish("broker unreachable".into()))
    }
}
