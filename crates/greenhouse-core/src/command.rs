//! Command abstractions.

use uuid::Uuid;

/// Trait that all commands implement.
///
/// Handlers use these accessors for structured logging and to stamp the
/// correlation ID onto every event the command produces.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// The type name for this command (for logging/routing).
    fn command_type(&self) -> &'static str;

    /// Correlation ID to trace this command through the system.
    fn correlation_id(&self) -> Uuid;
}
