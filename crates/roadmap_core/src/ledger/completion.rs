//! Completion ledger: checked state per rendered `(month, position)` coordinate.
//!
//! # Invariants
//! - The ledger is positional. It carries no task identity, so a task moving
//!   to another position inherits whatever state that position had.
//! - Built from the rendered tree wholesale; never merged incrementally.

use super::{parse_index_key, parse_object};
use crate::model::roadmap::MonthIndex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Coordinate of a checkable item at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TaskBinding {
    pub month: MonthIndex,
    /// Index within the month's task sequence.
    pub position: usize,
}

impl TaskBinding {
    pub fn new(month: MonthIndex, position: usize) -> Self {
        Self { month, position }
    }
}

/// Mapping `month -> position -> checked`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionLedger {
    entries: BTreeMap<MonthIndex, BTreeMap<usize, bool>>,
}

impl CompletionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the ledger from every rendered checkable item.
    ///
    /// Unchecked items are recorded as `false` so the persisted shape lists
    /// every rendered coordinate.
    pub fn from_rendered(items: impl IntoIterator<Item = (TaskBinding, bool)>) -> Self {
        let mut ledger = Self::new();
        for (binding, checked) in items {
            ledger.set(binding, checked);
        }
        ledger
    }

    /// Decodes the persisted blob leniently; only JSON `true` counts as checked.
    pub fn decode(raw: &str) -> Self {
        let Some(object) = parse_object(raw, "completion") else {
            return Self::new();
        };

        let mut ledger = Self::new();
        for (month_key, positions) in object {
            let (Some(month), Value::Object(positions)) = (parse_index_key(&month_key), positions)
            else {
                continue;
            };
            for (position_key, checked) in positions {
                let Some(position) = parse_index_key(&position_key) else {
                    continue;
                };
                if let Value::Bool(checked) = checked {
                    ledger.set(TaskBinding::new(month, position), checked);
                }
            }
        }
        ledger
    }

    /// Encodes as `{ "<month>": { "<position>": bool } }`.
    pub fn encode(&self) -> String {
        // BTreeMap<usize, _> keys serialize as JSON strings.
        serde_json::to_string(&self.entries).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn set(&mut self, binding: TaskBinding, checked: bool) {
        self.entries
            .entry(binding.month)
            .or_default()
            .insert(binding.position, checked);
    }

    pub fn is_checked(&self, binding: TaskBinding) -> bool {
        self.entries
            .get(&binding.month)
            .and_then(|positions| positions.get(&binding.position))
            .copied()
            .unwrap_or(false)
    }

    pub fn checked_count(&self) -> usize {
        self.entries
            .values()
            .flat_map(|positions| positions.values())
            .filter(|checked| **checked)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
