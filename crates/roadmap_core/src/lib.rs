//! Core domain logic for the roadmap tracker.
//! This crate is the single source of truth for roadmap, ledger and progress
//! invariants; UI layers only render snapshots and forward user events.

pub mod config;
pub mod db;
pub mod ledger;
pub mod logging;
pub mod model;
pub mod progress;
pub mod render;
pub mod service;
pub mod store;

pub use config::resolve_store_path;
pub use ledger::completion::{CompletionLedger, TaskBinding};
pub use ledger::custom_tasks::CustomTaskLedger;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::roadmap::{parse_month_selection, Month, MonthIndex, Roadmap};
pub use progress::{compute_progress, Progress, Tier};
pub use render::{
    render_roadmap, MonthView, RenderTarget, RoadmapView, TaskView, TreeRenderTarget, UiEvent,
};
pub use service::session::RoadmapSession;
pub use store::{
    KeyValueStore, MemoryStore, SqliteKvStore, StoreError, StoreResult, CUSTOM_TASKS_KEY,
    PROGRESS_KEY,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
