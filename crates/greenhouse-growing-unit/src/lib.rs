//! Greenhouse — Growing Units bounded context.
//!
//! A growing unit (pot, bed, basket, box) sits in a location, has a
//! capacity and owns the plants growing in it.

pub mod application;
pub mod domain;
