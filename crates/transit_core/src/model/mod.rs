//! Transit network domain model.
//!
//! # Responsibility
//! - Define the in-memory shape of a loaded network dataset.
//! - Mirror the JSON input layout so parsing needs no custom mapping.
//!
//! # Invariants
//! - Records are created by the data reader and never mutated afterwards.
//! - A line has no persisted row of its own, only membership pairs.

pub mod network;
