//! Application services for the Plant Species context.

pub mod command_handlers;
pub mod query_handlers;
