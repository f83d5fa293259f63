//! In-memory store with optional quota, modeled after browser local storage.

use super::{KeyValueStore, StoreError, StoreResult};
use std::collections::HashMap;

/// `HashMap`-backed store.
///
/// Quota accounting counts key and value bytes of every entry. An unavailable
/// store fails every call, which is how tests simulate a disabled backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    quota_bytes: Option<usize>,
    unavailable: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that rejects writes pushing total usage above `quota_bytes`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            quota_bytes: Some(quota_bytes),
            ..Self::default()
        }
    }

    /// Store whose every call fails with `StoreError::Unavailable`.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// Toggles availability at runtime, keeping existing entries.
    pub fn set_available(&mut self, available: bool) {
        self.unavailable = !available;
    }

    /// Seeds one raw entry, bypassing quota and availability checks.
    pub fn seed(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Raw value lookup that ignores availability; for assertions.
    pub fn peek(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.entries
            .iter()
            .filter(|(existing, _)| existing.as_str() != key)
            .map(|(existing, value)| existing.len() + value.len())
            .sum()
    }

    fn ensure_available(&self) -> StoreResult<()> {
        if self.unavailable {
            return Err(StoreError::Unavailable(
                "memory store disabled".to_string(),
            ));
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.ensure_available()?;
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.ensure_available()?;
        if let Some(limit) = self.quota_bytes {
            let needed = self.used_bytes_without(key) + key.len() + value.len();
            if needed > limit {
                return Err(StoreError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    limit,
                });
            }
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        self.ensure_available()?;
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryStore;
    use crate::store::{KeyValueStore, StoreError};

    #[test]
    fn set_get_remove_round_trip() {
        let mut store = MemoryStore::new();
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
        store.remove("k").unwrap();
    }

    #[test]
    fn quota_counts_replacement_not_previous_value() {
        let mut store = MemoryStore::with_quota(6);
        store.set("k", "12345").unwrap();
        store.set("k", "abcde").unwrap();
        let err = store.set("k", "abcdef").unwrap_err();
        assert!(matches!(err, StoreError::QuotaExceeded { needed: 7, limit: 6, .. }));
        assert_eq!(store.peek("k"), Some("abcde"));
    }

    #[test]
    fn unavailable_store_fails_every_call() {
        let mut store = MemoryStore::unavailable();
        assert!(matches!(store.get("k"), Err(StoreError::Unavailable(_))));
        assert!(matches!(store.set("k", "v"), Err(StoreError::Unavailable(_))));
        assert!(matches!(store.remove("k"), Err(StoreError::Unavailable(_))));
    }
}
