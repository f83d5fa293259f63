//! Custom task ledger: user-added task texts per month.
//!
//! # Invariants
//! - No month maps to an empty sequence; emptied entries are pruned.
//! - Only tasks listed here are deletable.

use super::{json_kind, parse_index_key, parse_object};
use crate::model::roadmap::MonthIndex;
use log::warn;
use serde_json::Value;
use std::collections::BTreeMap;

/// Mapping from month index to user-added task texts, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomTaskLedger {
    entries: BTreeMap<MonthIndex, Vec<String>>,
}

impl CustomTaskLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes the persisted blob leniently.
    ///
    /// Keys that are not month indices, non-array values and non-string
    /// elements are skipped. Unparsable input yields an empty ledger.
    pub fn decode(raw: &str) -> Self {
        let Some(object) = parse_object(raw, "custom_tasks") else {
            return Self::new();
        };

        let mut entries = BTreeMap::new();
        for (key, value) in object {
            let Some(month) = parse_index_key(&key) else {
                warn!(
                    "event=ledger_decode module=ledger status=skip ledger=custom_tasks reason=bad_month_key"
                );
                continue;
            };
            let items = match value {
                Value::Array(items) => items,
                other => {
                    warn!(
                        "event=ledger_decode module=ledger status=skip ledger=custom_tasks month={month} reason=not_an_array kind={}",
                        json_kind(&other)
                    );
                    continue;
                }
            };
            let tasks: Vec<String> = items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(text) => Some(text),
                    _ => None,
                })
                .collect();
            if !tasks.is_empty() {
                entries.insert(month, tasks);
            }
        }
        Self { entries }
    }

    /// Encodes as `{ "<month>": ["task", ...] }`.
    pub fn encode(&self) -> String {
        let object: serde_json::Map<String, Value> = self
            .entries
            .iter()
            .map(|(month, tasks)| {
                (
                    month.to_string(),
                    Value::Array(tasks.iter().cloned().map(Value::String).collect()),
                )
            })
            .collect();
        Value::Object(object).to_string()
    }

    pub fn tasks(&self, month: MonthIndex) -> Option<&[String]> {
        self.entries.get(&month).map(Vec::as_slice)
    }

    /// Returns whether `text` was user-added to `month`.
    pub fn contains(&self, month: MonthIndex, text: &str) -> bool {
        self.tasks(month)
            .is_some_and(|tasks| tasks.iter().any(|task| task == text))
    }

    pub fn iter(&self) -> impl Iterator<Item = (MonthIndex, &[String])> {
        self.entries
            .iter()
            .map(|(month, tasks)| (*month, tasks.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends `text` to the month entry, creating it when absent.
    pub fn push(&mut self, month: MonthIndex, text: impl Into<String>) {
        self.entries.entry(month).or_default().push(text.into());
    }

    /// Removes every occurrence of `text` from the month entry.
    ///
    /// Returns the number of removed occurrences. Prunes the entry when it
    /// becomes empty.
    pub fn remove_all(&mut self, month: MonthIndex, text: &str) -> usize {
        let Some(tasks) = self.entries.get_mut(&month) else {
            return 0;
        };
        let before = tasks.len();
        tasks.retain(|task| task != text);
        let removed = before - tasks.len();
        if tasks.is_empty() {
            self.entries.remove(&month);
        }
        removed
    }

    /// Drops entries whose month index is not accepted by `keep`.
    pub fn retain_months(&mut self, mut keep: impl FnMut(MonthIndex) -> bool) {
        self.entries.retain(|month, _| keep(*month));
    }
}

#[cfg(test)]
mod tests {
    use super::CustomTaskLedger;

    #[test]
    fn decode_skips_malformed_entries() {
        let ledger = CustomTaskLedger::decode(
            r#"{"0": ["a", 7, "b"], "x": ["lost"], "2": "not-array", "3": []}"#,
        );
        assert_eq!(
            ledger.tasks(0),
            Some(&["a".to_string(), "b".to_string()][..])
        );
        assert_eq!(ledger.tasks(2), None);
        assert_eq!(ledger.tasks(3), None);
        assert_eq!(ledger.iter().count(), 1);
    }

    #[test]
    fn decode_treats_invalid_json_and_non_objects_as_empty() {
        assert!(CustomTaskLedger::decode("{not json").is_empty());
        assert!(CustomTaskLedger::decode("[1, 2]").is_empty());
        assert!(CustomTaskLedger::decode("null").is_empty());
    }

    #[test]
    fn remove_all_prunes_empty_entry() {
        let mut ledger = CustomTaskLedger::new();
        ledger.push(1, "x");
        ledger.push(1, "x");
        assert_eq!(ledger.remove_all(1, "x"), 2);
        assert!(ledger.is_empty());
        assert_eq!(ledger.encode(), "{}");
    }

    #[test]
    fn encode_uses_string_month_keys() {
        let mut ledger = CustomTaskLedger::new();
        ledger.push(0, "Write outline");
        assert_eq!(ledger.encode(), r#"{"0":["Write outline"]}"#);
        assert_eq!(CustomTaskLedger::decode(&ledger.encode()), ledger);
    }
}
