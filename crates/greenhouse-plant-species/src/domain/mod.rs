//! Domain model for the Plant Species context.

pub mod aggregates;
pub mod commands;
pub mod events;
pub mod value_objects;
