//! Field allow-list projection.
//!
//! # Invariants
//! - Output keys are a subset of the kind's allow-list.
//! - Kept values are copied unchanged; absent fields are never synthesized.
//! - Kinds without an allow-list pass through unchanged.

use super::allow_list::allowed_fields;
use super::classifier::EntryKind;
use crate::model::document::RawEntry;
use log::debug;
use serde_json::{Map, Value};

/// Reduces `entry` to the generator-compatible field set for `kind`.
pub fn project(entry: &RawEntry, kind: EntryKind) -> RawEntry {
    let (Some(fields), RawEntry::Object(map)) = (allowed_fields(kind), entry) else {
        return entry.clone();
    };

    let projected = project_map(map, fields);
    let dropped = map.len() - projected.len();
    if dropped > 0 {
        debug!(
            "event=entry_project module=taxonomy status=ok kind={} dropped_fields={} dropped={}",
            kind.as_str(),
            dropped,
            dropped_keys(map, fields).join(",")
        );
    }
    RawEntry::Object(projected)
}

/// Copies only `fields` from `map`, keeping the source key order.
pub fn project_map(map: &Map<String, Value>, fields: &[&str]) -> Map<String, Value> {
    map.iter()
        .filter(|(key, _)| fields.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

fn dropped_keys<'a>(map: &'a Map<String, Value>, fields: &[&str]) -> Vec<&'a str> {
    map.keys()
        .map(String::as_str)
        .filter(|key| !fields.contains(key))
        .collect()
}
