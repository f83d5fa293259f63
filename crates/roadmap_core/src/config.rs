//! Runtime configuration shared by the FFI and CLI entry points.

use std::path::PathBuf;

/// Environment variable overriding the durable store location.
pub const STORE_PATH_ENV: &str = "ROADMAP_DB_PATH";
/// File name used under the temp directory when no override is set.
pub const DEFAULT_STORE_FILE_NAME: &str = "roadmap_tracker.sqlite3";

/// Resolves the durable store path.
///
/// Uses `ROADMAP_DB_PATH` when it is set to a non-blank value, otherwise
/// `<temp_dir>/roadmap_tracker.sqlite3`.
pub fn resolve_store_path() -> PathBuf {
    store_path_from(std::env::var(STORE_PATH_ENV).ok().as_deref())
}

fn store_path_from(raw: Option<&str>) -> PathBuf {
    match raw.map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => PathBuf::from(trimmed),
        _ => std::env::temp_dir().join(DEFAULT_STORE_FILE_NAME),
    }
}

#[cfg(test)]
mod tests {
    use super::{store_path_from, DEFAULT_STORE_FILE_NAME};
    use std::path::PathBuf;

    #[test]
    fn blank_override_falls_back_to_temp_dir() {
        let fallback = std::env::temp_dir().join(DEFAULT_STORE_FILE_NAME);
        assert_eq!(store_path_from(None), fallback);
        assert_eq!(store_path_from(Some("   ")), fallback);
    }

    #[test]
    fn override_is_trimmed() {
        assert_eq!(
            store_path_from(Some(" /data/roadmap.db ")),
            PathBuf::from("/data/roadmap.db")
        );
    }
}
