//! Greenhouse Store — datastore adapters for the core repository and
//! event bus contracts.
//!
//! Two document stores are provided: an in-memory one used by tests and
//! local development, and a PostgreSQL one keeping every aggregate as a
//! JSONB document. Each comes with its own criteria translator.

pub mod event_bus;
pub mod memory_repository;
pub mod memory_translator;
pub mod pg_document_repository;
pub mod pg_translator;
pub mod schema;

#[cfg(test)]
pub(crate) mod fixtures;
