//! Greenhouse — Plant Species catalogue bounded context.
//!
//! Responsible for the reference data about each species: names,
//! family, category, care difficulty, growth rate and growing ranges.

pub mod application;
pub mod domain;
