//! Use-case services over the network repository.
//!
//! # Responsibility
//! - Orchestrate the two-phase dataset write.
//! - Render membership lookups as line-oriented text output.

pub mod load_service;
pub mod query_service;
