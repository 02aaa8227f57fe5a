//! Aggregate root abstraction.
//!
//! Aggregates keep their current state as plain fields; events are a
//! side channel recorded next to that state and drained once the state has
//! been persisted. Each aggregate owns an [`EventRecorder`] and exposes it
//! through [`AggregateRoot`].

use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::error::DomainError;
use crate::event::DomainEvent;

/// Ordered list of events recorded since the last drain.
#[derive(Debug, Clone)]
pub struct EventRecorder<E> {
    pending: Vec<E>,
}

impl<E> Default for EventRecorder<E> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
        }
    }
}

impl<E> EventRecorder<E> {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event. Never fails and performs no I/O.
    pub fn record(&mut self, event: E) {
        self.pending.push(event);
    }

    /// Pending events in the order they were recorded.
    #[must_use]
    pub fn uncommitted(&self) -> &[E] {
        &self.pending
    }

    /// Drains and returns all pending events, leaving the recorder empty.
    pub fn take(&mut self) -> Vec<E> {
        std::mem::take(&mut self.pending)
    }

    /// Discards all pending events.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Number of pending events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether there are no pending events.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Trait for aggregate roots that record domain events alongside their
/// current state.
pub trait AggregateRoot: Send + Sync {
    /// The event type this aggregate produces.
    type Event: DomainEvent;

    /// Aggregate type tag carried in event metadata and error messages.
    const AGGREGATE_TYPE: &'static str;

    /// Returns the aggregate identifier.
    fn aggregate_id(&self) -> Uuid;

    /// The aggregate's event recorder.
    fn recorder(&self) -> &EventRecorder<Self::Event>;

    /// Mutable access to the aggregate's event recorder.
    fn recorder_mut(&mut self) -> &mut EventRecorder<Self::Event>;

    /// Records an event. This is the only way events become pending.
    fn apply(&mut self, event: Self::Event) {
        self.recorder_mut().record(event);
    }

    /// Returns uncommitted events produced by command handling.
    fn uncommitted_events(&self) -> &[Self::Event] {
        self.recorder().uncommitted()
    }

    /// Clears uncommitted events. Idempotent.
    fn clear_events(&mut self) {
        self.recorder_mut().clear();
    }

    /// Drains uncommitted events for publication.
    fn take_uncommitted_events(&mut self) -> Vec<Self::Event> {
        self.recorder_mut().take()
    }
}

/// An aggregate that can be written to and rebuilt from a plain,
/// serializable projection of its state.
pub trait Persistable: AggregateRoot + Sized {
    /// The serializable projection (view model) of the aggregate.
    type Primitives: Serialize + DeserializeOwned + Clone + Send + Sync + 'static;

    /// Projects all current-state fields, children included. Pure.
    fn to_primitives(&self) -> Self::Primitives;

    /// Rebuilds the aggregate from stored primitives without recording any
    /// event.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if a stored value no longer passes
    /// value object validation.
    fn from_primitives(primitives: Self::Primitives) -> Result<Self, DomainError>;
}
