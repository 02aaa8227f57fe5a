//! A minimal persistable aggregate for exercising the stores.

use greenhouse_core::aggregate::{AggregateRoot, EventRecorder, Persistable};
use greenhouse_core::error::DomainError;
use greenhouse_core::event::{DomainEvent, EventMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub(crate) struct LabelEvent {
    metadata: EventMetadata,
}

impl DomainEvent for LabelEvent {
    fn event_type(&self) -> &'static str {
        "label.touched"
    }

    fn to_payload(&self) -> serde_json::Value {
        serde_json::Value::Null
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct LabelPrimitives {
    pub id: Uuid,
    pub status: String,
    pub rank: i64,
    pub note: Option<String>,
}

#[derive(Debug, Clone)]
pub(crate) struct Label {
    pub state: LabelPrimitives,
    events: EventRecorder<LabelEvent>,
}

impl Label {
    pub fn new(status: &str, rank: i64) -> Self {
        Self {
            state: LabelPrimitives {
                id: Uuid::new_v4(),
                status: status.to_owned(),
                rank,
                note: None,
            },
            events: EventRecorder::new(),
        }
    }
}

impl AggregateRoot for Label {
    type Event = LabelEvent;
    const AGGREGATE_TYPE: &'static str = "label";

    fn aggregate_id(&self) -> Uuid {
        self.state.id
    }

    fn recorder(&self) -> &EventRecorder<LabelEvent> {
        &self.events
    }

    fn recorder_mut(&mut self) -> &mut EventRecorder<LabelEvent> {
        &mut self.events
    }
}

impl Persistable for Label {
    type Primitives = LabelPrimitives;

    fn to_primitives(&self) -> LabelPrimitives {
        self.state.clone()
    }

    fn from_primitives(primitives: LabelPrimitives) -> Result<Self, DomainError> {
        if primitives.rank < 0 {
            return Err(DomainError::validation("rank must not be negative"));
        }
        Ok(Self {
            state: primitives,
            events: EventRecorder::new(),
        })
    }
}
