//! Persisted ledgers mirrored into the key-value store.
//!
//! # Responsibility
//! - `custom_tasks`: which roadmap tasks were user-added, per month.
//! - `completion`: checked state per `(month, task-position)` coordinate.
//!
//! # Invariants
//! - Decoding never fails: malformed blobs degrade to an empty ledger and
//!   malformed entries are skipped individually.
//! - Encoded JSON uses decimal string keys for month and position indices.

pub mod completion;
pub mod custom_tasks;

use log::warn;
use serde_json::{Map, Value};

/// Parses `raw` into a JSON object, logging and returning `None` otherwise.
fn parse_object(raw: &str, ledger: &'static str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Some(map),
        // Stored `null` is what an explicitly cleared ledger looks like.
        Ok(Value::Null) => None,
        Ok(other) => {
            warn!(
                "event=ledger_decode module=ledger status=error ledger={ledger} error_code=not_an_object kind={}",
                json_kind(&other)
            );
            None
        }
        Err(err) => {
            warn!(
                "event=ledger_decode module=ledger status=error ledger={ledger} error_code=invalid_json error={err}"
            );
            None
        }
    }
}

/// Parses a decimal index key such as `"3"`.
fn parse_index_key(key: &str) -> Option<usize> {
    key.trim().parse().ok()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
