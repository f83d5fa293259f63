//! Persisted key-value store adapters.
//!
//! # Responsibility
//! - Define the opaque synchronous string store consumed by the session.
//! - Provide in-memory and SQLite-backed implementations.
//!
//! # Invariants
//! - Every operation returns an explicit `StoreResult`; callers decide whether
//!   to log and discard a failure. No store call panics.
//! - A store has exactly one owner; there is no concurrent writer.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteKvStore;

/// Store key holding the custom task ledger JSON blob.
pub const CUSTOM_TASKS_KEY: &str = "customTasksByMonth";
/// Store key holding the completion ledger JSON blob.
pub const PROGRESS_KEY: &str = "progressData";

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure kinds surfaced by store adapters.
#[derive(Debug)]
pub enum StoreError {
    /// Backend cannot be reached at all.
    Unavailable(String),
    /// Write would exceed the backend size quota.
    QuotaExceeded {
        key: String,
        needed: usize,
        limit: usize,
    },
    /// SQLite-level failure.
    Db(DbError),
}

impl StoreError {
    /// Stable error code used in structured log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unavailable(_) => "store_unavailable",
            Self::QuotaExceeded { .. } => "store_quota_exceeded",
            Self::Db(_) => "store_db_error",
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(reason) => write!(f, "store unavailable: {reason}"),
            Self::QuotaExceeded { key, needed, limit } => write!(
                f,
                "store quota exceeded writing `{key}`: needs {needed} bytes, limit {limit}"
            ),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Opaque synchronous string store keyed by string.
pub trait KeyValueStore {
    /// Reads one value. `Ok(None)` when the key is absent.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    /// Writes one value, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;
    /// Removes one key. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> StoreResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        (**self).remove(key)
    }
}
