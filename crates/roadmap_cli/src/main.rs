//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `roadmap_core` linkage and the durable store path.
//! - Print the rendered roadmap as text for quick local sanity checks.
//!
//! Usage: `roadmap_cli [db_path]`. Without an argument the store path is
//! resolved from `ROADMAP_DB_PATH` or the temp directory.

use roadmap_core::{Roadmap, RoadmapSession, SqliteKvStore, TreeRenderTarget};
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("roadmap_core ping={}", roadmap_core::ping());
    println!("roadmap_core version={}", roadmap_core::core_version());

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(roadmap_core::resolve_store_path);
    println!("store={}", path.display());

    let store = match SqliteKvStore::open(&path) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("failed to open store: {err}");
            return ExitCode::FAILURE;
        }
    };
    let session = RoadmapSession::open(store, TreeRenderTarget::new(), Roadmap::default_months());
    print!("{}", session.target().to_text());
    ExitCode::SUCCESS
}
