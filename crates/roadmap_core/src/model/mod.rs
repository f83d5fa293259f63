//! Roadmap domain model.
//!
//! # Responsibility
//! - Define the fixed ordered list of months and their task sequences.
//! - Provide the append/remove primitives used by session mutations.
//!
//! # Invariants
//! - A month is identified by its index; months are never reordered or removed.
//! - Task sequences only change through single appends and single removals.

pub mod roadmap;
