//! Command orchestration shared by every bounded context.
//!
//! A command handler loads its aggregate through
//! [`AssertExists`](crate::repository::AssertExists), mutates it in memory
//! and then hands it to [`commit_save`] or [`commit_delete`], which persist
//! first and publish second. Nothing is published unless persistence
//! succeeded; a failed publish is logged and does not fail the command.

use tracing::{debug, warn};
use uuid::Uuid;

use crate::aggregate::AggregateRoot;
use crate::bus::EventBus;
use crate::error::DomainError;
use crate::event::EventEnvelope;
use crate::repository::WriteRepository;
use crate::tenant::TenantId;

/// Result of a successfully handled command.
#[derive(Debug, Clone)]
pub struct CommandOutcome {
    /// The aggregate affected or created by the command.
    pub aggregate_id: Uuid,
    /// The events that were drained and handed to the bus.
    pub events: Vec<EventEnvelope>,
}

/// Upserts the aggregate, then publishes its uncommitted events.
///
/// # Errors
///
/// Returns the repository's error if `save` fails. In that case no event
/// is published and the aggregate's pending events are left in place.
pub async fn commit_save<A: AggregateRoot>(
    aggregate: &mut A,
    tenant_id: TenantId,
    repo: &dyn WriteRepository<A>,
    bus: &dyn EventBus,
) -> Result<CommandOutcome, DomainError> {
    repo.save(tenant_id, aggregate).await?;
    Ok(publish_uncommitted(aggregate, bus).await)
}

/// Deletes the aggregate's row, then publishes its uncommitted events.
///
/// # Errors
///
/// Returns the repository's error if `delete` fails. In that case no event
/// is published and the aggregate's pending events are left in place.
pub async fn commit_delete<A: AggregateRoot>(
    aggregate: &mut A,
    tenant_id: TenantId,
    repo: &dyn WriteRepository<A>,
    bus: &dyn EventBus,
) -> Result<CommandOutcome, DomainError> {
    repo.delete(tenant_id, aggregate.aggregate_id()).await?;
    Ok(publish_uncommitted(aggregate, bus).await)
}

async fn publish_uncommitted<A: AggregateRoot>(
    aggregate: &mut A,
    bus: &dyn EventBus,
) -> CommandOutcome {
    let aggregate_id = aggregate.aggregate_id();
    let events: Vec<EventEnvelope> = aggregate
        .take_uncommitted_events()
        .iter()
        .map(EventEnvelope::from_event)
        .collect();

    if events.is_empty() {
        debug!(%aggregate_id, "no events to publish");
    } else if let Err(err) = bus.publish_all(&events).await {
        warn!(
            %aggregate_id,
            event_count = events.len(),
            error = %err,
            "failed to publish events; state is already persisted"
        );
    }

    CommandOutcome {
        aggregate_id,
        events,
    }
}
