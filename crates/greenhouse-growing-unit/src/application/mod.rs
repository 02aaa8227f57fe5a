//! Application services for the Growing Units context.

pub mod command_handlers;
pub mod query_handlers;
