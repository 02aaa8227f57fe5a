//! Domain model for the Growing Units context.

pub mod aggregates;
pub mod commands;
pub mod events;
pub mod plant;
pub mod value_objects;
