//! Repository layer for network persistence.
//!
//! # Responsibility
//! - Define the data access contract used by the writer and query services.
//! - Isolate SQLite statements from service orchestration.
//!
//! # Invariants
//! - Every statement is parameterized; user input never reaches SQL text.
//! - Read paths stream rows to a visitor instead of collecting them.

pub mod network_repo;
