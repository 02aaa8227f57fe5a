//! Route modules organized by bounded context.

pub mod growing_units;
pub mod health;
pub mod plant_species;

use greenhouse_core::handler::CommandOutcome;
use serde::Serialize;
use uuid::Uuid;

/// Response body returned after a command is successfully handled.
#[derive(Debug, Serialize)]
pub struct CommandResponse {
    /// The aggregate the command acted on.
    pub aggregate_id: Uuid,
    /// IDs of the domain events produced, in emission order.
    pub event_ids: Vec<Uuid>,
}

impl From<CommandOutcome> for CommandResponse {
    fn from(outcome: CommandOutcome) -> Self {
        Self {
            aggregate_id: outcome.aggregate_id,
            event_ids: outcome
                .events
                .iter()
                .map(|e| e.metadata.event_id)
                .collect(),
        }
    }
}
