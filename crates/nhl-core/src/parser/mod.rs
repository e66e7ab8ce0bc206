//! Extraction of records from raw API responses
//!
//! Every record follows the same shape: normalize keys once, pick the
//! record's fields from the top level and from each known nested
//! sub-object, build nested records with their own rules, then merge.
//! - `keys`: key normalizer, prefixer and field filter
//! - `team`: Team records
//! - `game`: Play and Game records
//! - `boxscore`: Boxscore records
//! - `schedule`: ScheduleDate records

pub mod boxscore;
pub mod game;
pub mod keys;
pub mod schedule;
pub mod team;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

// Re-export main helpers
pub use keys::{
    camel_to_snake_case, filter_fields, merge, normalize_keys, partition_fields, prefix_keys,
};

/// A record that can be extracted from a raw, nested JSON mapping.
pub trait Record: Sized + Default + Serialize + DeserializeOwned {
    /// Record name used in diagnostics
    const NAME: &'static str;

    /// Field manifest, using the snake_case names of the external schema
    const FIELDS: &'static [&'static str];

    /// Build the record from a raw mapping. Never fails: unknown keys are
    /// dropped and missing keys leave their field at `None`.
    fn extract(raw: &Map<String, Value>) -> Self;

    /// Build the record from any JSON value; non-objects give the default record.
    fn from_value(raw: &Value) -> Self {
        match raw {
            Value::Object(map) => Self::extract(map),
            _ => Self::default(),
        }
    }

    /// Restrict a normalized mapping to this record's fields.
    fn filter(map: &Map<String, Value>) -> Map<String, Value> {
        filter_fields(map, Self::FIELDS, Self::NAME)
    }

    /// Record as a mapping of field name to value, optionally without the
    /// fields that are `None`.
    fn to_map(&self, drop_missing: bool) -> Map<String, Value> {
        let mut map = match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        };
        if drop_missing {
            map.retain(|_, value| !value.is_null());
        }
        map
    }
}

/// Construct a record from an already merged, normalized mapping.
pub(crate) fn build<R: Record>(merged: Map<String, Value>) -> R {
    serde_json::from_value(Value::Object(merged)).unwrap_or_else(|e| {
        warn!(record = R::NAME, error = %e, "could not construct record");
        R::default()
    })
}

/// Build a nested record from a sub-mapping; `None` when extraction leaves
/// every field empty.
///
/// Presence is decided on the extracted values, not on the keys: a known key
/// holding `null` or a mistyped value does not make the record present, so
/// `{"team": {"id": null}}` has no team.
pub(crate) fn nested<R: Record>(raw: &Map<String, Value>) -> Option<R> {
    let record = R::extract(raw);
    if record.to_map(true).is_empty() {
        None
    } else {
        Some(record)
    }
}

/// Build one record per object in a list; `None` for a missing or empty list.
pub(crate) fn nested_list<R: Record>(raw: Option<&Value>) -> Option<Vec<R>> {
    let items = raw.and_then(Value::as_array)?;
    let records: Vec<R> = items
        .iter()
        .filter_map(Value::as_object)
        .map(R::extract)
        .collect();
    if records.is_empty() {
        None
    } else {
        Some(records)
    }
}
