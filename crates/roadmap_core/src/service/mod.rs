//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate model, ledger, store and render calls into user actions.
//! - Keep UI/FFI layers decoupled from storage and ledger details.

pub mod session;
