//! Domain event abstractions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clock::Clock;

/// Metadata attached to every domain event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMetadata {
    /// Unique event identifier.
    pub event_id: Uuid,
    /// Event type tag, e.g. `growing_unit.name_changed`.
    pub event_type: String,
    /// Aggregate this event belongs to.
    pub aggregate_id: Uuid,
    /// Aggregate type tag, e.g. `growing_unit`.
    pub aggregate_type: String,
    /// Correlation ID for tracing a command through its effects.
    pub correlation_id: Uuid,
    /// Timestamp of event creation.
    pub occurred_at: DateTime<Utc>,
}

impl EventMetadata {
    /// Builds metadata for a new event, stamped from the given context.
    #[must_use]
    pub fn new(
        event_type: &'static str,
        aggregate_type: &'static str,
        aggregate_id: Uuid,
        ctx: &EventContext<'_>,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            event_type: event_type.to_owned(),
            aggregate_id,
            aggregate_type: aggregate_type.to_owned(),
            correlation_id: ctx.correlation_id,
            occurred_at: ctx.clock.now(),
        }
    }
}

/// Trait that all domain events implement.
pub trait DomainEvent: Send + Sync + std::fmt::Debug {
    /// Returns the event type name (used for serialization routing).
    fn event_type(&self) -> &'static str;

    /// Serializes the event payload to JSON.
    fn to_payload(&self) -> serde_json::Value;

    /// Returns the metadata for this event.
    fn metadata(&self) -> &EventMetadata;
}

/// Per-command information threaded into aggregate mutators.
#[derive(Clone, Copy)]
pub struct EventContext<'a> {
    /// Correlation ID of the command being handled.
    pub correlation_id: Uuid,
    /// Time source for `occurred_at`.
    pub clock: &'a dyn Clock,
}

impl<'a> EventContext<'a> {
    /// Creates a new context.
    #[must_use]
    pub fn new(correlation_id: Uuid, clock: &'a dyn Clock) -> Self {
        Self {
            correlation_id,
            clock,
        }
    }
}

impl std::fmt::Debug for EventContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventContext")
            .field("correlation_id", &self.correlation_id)
            .finish_non_exhaustive()
    }
}

/// Payload of a single-field change: the owning aggregate plus the
/// primitive old and new values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldChanged<T> {
    /// Aggregate identifier.
    pub id: Uuid,
    /// Value before the change.
    pub old_value: T,
    /// Value after the change.
    pub new_value: T,
}

impl<T> FieldChanged<T> {
    /// Creates a change record.
    pub fn new(id: Uuid, old_value: T, new_value: T) -> Self {
        Self {
            id,
            old_value,
            new_value,
        }
    }
}

/// Serialized, bus-facing form of a domain event.
///
/// Carries no live references into the aggregate, only the metadata and
/// the JSON payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Serialized event payload.
    pub data: serde_json::Value,
}

impl EventEnvelope {
    /// Converts a typed domain event into its envelope.
    pub fn from_event<E: DomainEvent>(event: &E) -> Self {
        Self {
            metadata: event.metadata().clone(),
            data: event.to_payload(),
        }
    }

    /// Returns the event type tag.
    #[must_use]
    pub fn event_type(&self) -> &str {
        &self.metadata.event_type
    }
}
