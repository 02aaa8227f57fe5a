//! Greenhouse Core — shared domain abstractions.
//!
//! This crate defines the aggregate/event tracking primitives, the
//! storage-independent criteria model and the repository and event bus
//! contracts that every bounded context depends on. It contains no
//! infrastructure code.

pub mod aggregate;
pub mod bus;
pub mod clock;
pub mod command;
pub mod criteria;
pub mod error;
pub mod event;
pub mod handler;
pub mod pagination;
pub mod repository;
pub mod tenant;
