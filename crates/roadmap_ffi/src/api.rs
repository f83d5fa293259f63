//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose roadmap use-cases to Dart via FRB as sync calls.
//! - Hold the single active session for the process behind a mutex.
//! - Convert core views into flat DTOs the UI renders directly.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Mutating calls return a fresh view so the UI never re-derives state.

use log::{info, warn};
use roadmap_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    resolve_store_path, MonthIndex, Progress, Roadmap, RoadmapSession, RoadmapView,
    SqliteKvStore, TaskBinding, TreeRenderTarget,
};
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

type FfiSession = RoadmapSession<SqliteKvStore, TreeRenderTarget>;

static SESSION: Mutex<Option<FfiSession>> = Mutex::new(None);

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One task row as rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoadmapTaskDto {
    pub month: u32,
    /// Position inside the month; together with `month` identifies the checkbox.
    pub position: u32,
    pub text: String,
    pub checked: bool,
    /// Whether the row shows a delete control (custom tasks only).
    pub deletable: bool,
}

/// One month section as rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoadmapMonthDto {
    pub index: u32,
    pub name: String,
    pub tasks: Vec<RoadmapTaskDto>,
}

/// Aggregate progress for the progress bar and motivation message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoadmapProgressDto {
    pub percent: u32,
    /// `zero|low|medium|med_high|high|complete`.
    pub tier: String,
    /// Class list for the message element, e.g. `motivation med_high`.
    pub css_class: String,
    pub message: String,
}

/// Month selector entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthOptionDto {
    pub index: u32,
    pub label: String,
}

/// Response envelope for every roadmap call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoadmapResponse {
    /// Whether the session was available.
    pub ok: bool,
    /// Whether the call changed roadmap state. Ignored input yields `false`.
    pub changed: bool,
    /// Human-readable response message for diagnostics.
    pub message: String,
    pub months: Vec<RoadmapMonthDto>,
    pub progress: RoadmapProgressDto,
}

impl RoadmapResponse {
    fn from_view(view: RoadmapView, changed: bool, message: impl Into<String>) -> Self {
        Self {
            ok: true,
            changed,
            message: message.into(),
            months: view
                .months
                .into_iter()
                .enumerate()
                .map(|(index, month)| RoadmapMonthDto {
                    index: to_u32(index),
                    name: month.name,
                    tasks: month
                        .tasks
                        .into_iter()
                        .map(|task| RoadmapTaskDto {
                            month: to_u32(task.month),
                            position: to_u32(task.position),
                            text: task.text,
                            checked: task.checked,
                            deletable: task.deletable,
                        })
                        .collect(),
                })
                .collect(),
            progress: to_progress_dto(view.progress),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            changed: false,
            message: message.into(),
            months: Vec::new(),
            progress: to_progress_dto(Progress::default()),
        }
    }
}

/// Opens the durable store and starts the process-wide session.
///
/// `db_path` overrides the resolved store path (`ROADMAP_DB_PATH` or temp dir).
/// Reopening replaces any active session.
///
/// # FFI contract
/// - Sync call; opens a SQLite file.
/// - Never panics; store failures are returned in `message`.
#[flutter_rust_bridge::frb(sync)]
pub fn roadmap_open(db_path: Option<String>) -> RoadmapResponse {
    let path = db_path
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(resolve_store_path);

    let store = match SqliteKvStore::open(&path) {
        Ok(store) => store,
        Err(err) => {
            warn!(
                "event=roadmap_open module=ffi status=error error_code={} error={err}",
                err.code()
            );
            return RoadmapResponse::failure(format!("roadmap_open failed: {err}"));
        }
    };

    let session = RoadmapSession::open(store, TreeRenderTarget::new(), Roadmap::default_months());
    let view = session.target().snapshot();
    *lock_session() = Some(session);
    info!("event=roadmap_open module=ffi status=ok");
    RoadmapResponse::from_view(view, false, "Roadmap opened.")
}

/// Ends the active session. Returns whether one was open.
#[flutter_rust_bridge::frb(sync)]
pub fn roadmap_close() -> bool {
    lock_session().take().is_some()
}

/// Returns the current rendered roadmap.
#[flutter_rust_bridge::frb(sync)]
pub fn roadmap_view() -> RoadmapResponse {
    with_session(|_| (false, "OK."))
}

/// Month selector entries; empty when no session is open.
#[flutter_rust_bridge::frb(sync)]
pub fn roadmap_month_options() -> Vec<MonthOptionDto> {
    lock_session()
        .as_ref()
        .map(|session| {
            session
                .month_options()
                .into_iter()
                .map(|(index, label)| MonthOptionDto {
                    index: to_u32(index),
                    label,
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Adds a custom task from the raw month selector value and input text.
///
/// Blank text or an unknown month is ignored (`changed=false`).
#[flutter_rust_bridge::frb(sync)]
pub fn roadmap_add_task(month_value: String, text: String) -> RoadmapResponse {
    with_session(|session| {
        let changed = session.add_task_from_input(&month_value, &text);
        (changed, if changed { "Task added." } else { "Nothing to add." })
    })
}

/// Deletes a custom task; built-in or unknown tasks are ignored.
#[flutter_rust_bridge::frb(sync)]
pub fn roadmap_delete_task(month: u32, text: String) -> RoadmapResponse {
    with_session(|session| {
        let changed = session.delete_task(month as MonthIndex, &text);
        (
            changed,
            if changed { "Task deleted." } else { "Task is not deletable." },
        )
    })
}

/// Applies a checkbox change for `(month, position)`.
#[flutter_rust_bridge::frb(sync)]
pub fn roadmap_set_checked(month: u32, position: u32, checked: bool) -> RoadmapResponse {
    with_session(|session| {
        session.set_checked(
            TaskBinding::new(month as MonthIndex, position as usize),
            checked,
        );
        (true, "Progress updated.")
    })
}

fn with_session(f: impl FnOnce(&mut FfiSession) -> (bool, &'static str)) -> RoadmapResponse {
    let mut guard = lock_session();
    match guard.as_mut() {
        Some(session) => {
            let (changed, message) = f(session);
            RoadmapResponse::from_view(session.target().snapshot(), changed, message)
        }
        None => RoadmapResponse::failure("roadmap session is not open; call roadmap_open first"),
    }
}

fn lock_session() -> MutexGuard<'static, Option<FfiSession>> {
    // A panic while holding the lock leaves a complete session behind; every
    // mutation finishes before returning.
    SESSION
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn to_progress_dto(progress: Progress) -> RoadmapProgressDto {
    RoadmapProgressDto {
        percent: u32::from(progress.percent),
        tier: progress.tier.as_str().to_string(),
        css_class: progress.tier.css_class(),
        message: progress.message().to_string(),
    }
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, init_logging, ping, roadmap_add_task, roadmap_close, roadmap_delete_task,
        roadmap_month_options, roadmap_open, roadmap_set_checked, roadmap_view, to_progress_dto,
    };
    use roadmap_core::compute_progress;

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn progress_dto_carries_tier_id_and_message() {
        let dto = to_progress_dto(compute_progress(10, 2));
        assert_eq!(dto.percent, 20);
        assert_eq!(dto.tier, "medium");
        assert_eq!(dto.css_class, "motivation medium");
        assert!(dto.message.starts_with("Nice progress"));
    }

    // Single test owns the process-wide session to avoid cross-test races.
    #[test]
    fn session_lifecycle_round_trip() {
        let dir = tempfile::tempdir().expect("temp dir");
        let db_path = dir
            .path()
            .join("roadmap.sqlite3")
            .to_str()
            .expect("utf-8 path")
            .to_string();

        let opened = roadmap_open(Some(db_path.clone()));
        assert!(opened.ok, "{}", opened.message);
        assert_eq!(opened.months.len(), 9);
        assert_eq!(opened.progress.tier, "zero");
        assert_eq!(roadmap_month_options()[0].label, "Month 1");

        let ignored = roadmap_add_task("0".to_string(), "   ".to_string());
        assert!(ignored.ok);
        assert!(!ignored.changed);

        let added = roadmap_add_task("2".to_string(), "Launch".to_string());
        assert!(added.changed);
        let task = &added.months[2].tasks[0];
        assert_eq!(task.text, "Launch");
        assert!(task.deletable);

        let checked = roadmap_set_checked(2, 0, true);
        assert_eq!(checked.progress.percent, 100);
        assert_eq!(checked.progress.tier, "complete");

        assert!(roadmap_close());
        let reopened = roadmap_open(Some(db_path));
        assert!(reopened.months[2].tasks[0].checked);

        let deleted = roadmap_delete_task(2, "Launch".to_string());
        assert!(deleted.changed);
        assert!(deleted.months[2].tasks.is_empty());
        assert!(!roadmap_delete_task(2, "Launch".to_string()).changed);

        assert!(roadmap_close());
        assert!(!roadmap_view().ok);
        assert!(roadmap_month_options().is_empty());
    }
}
