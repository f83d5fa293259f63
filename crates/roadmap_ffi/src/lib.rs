//! Flutter bridge crate for the roadmap tracker.
//!
//! Thin adapter over `roadmap_core`; all invariants live in core.

pub mod api;
