//! Key utilities shared by every record extraction.
//!
//! The API uses camelCase keys spread across several nesting levels. These
//! helpers normalize keys once, tag keys of structurally identical
//! sub-mappings with a side prefix, and restrict a mapping to the fields a
//! record knows about.

use serde_json::{Map, Value};
use tracing::debug;

/// Convert a camelCase key to snake_case.
///
/// An underscore is inserted before every ASCII uppercase letter that is not
/// the first character, then the whole key is lowercased.
///
/// # Examples
/// ```
/// use nhl_core::parser::camel_to_snake_case;
///
/// assert_eq!(camel_to_snake_case("camelCase"), "camel_case");
/// assert_eq!(camel_to_snake_case("snake_thenCamelCase"), "snake_then_camel_case");
/// assert_eq!(camel_to_snake_case("GameData"), "game_data");
/// assert_eq!(camel_to_snake_case(""), "");
/// ```
pub fn camel_to_snake_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for (i, c) in key.chars().enumerate() {
        if i > 0 && c.is_ascii_uppercase() {
            out.push('_');
        }
        out.push(c);
    }
    out.to_lowercase()
}

/// Convert every key of a mapping to snake_case, at every nesting depth.
///
/// Values that are mappings are normalized recursively. Lists and scalars
/// are left untouched, including mappings stored inside lists.
pub fn normalize_keys(map: &Map<String, Value>) -> Map<String, Value> {
    map.iter()
        .map(|(key, value)| {
            let value = match value {
                Value::Object(inner) => Value::Object(normalize_keys(inner)),
                other => other.clone(),
            };
            (camel_to_snake_case(key), value)
        })
        .collect()
}

/// Prepend `prefix` to every top-level key of a mapping.
///
/// Nested mappings are not touched and no deduplication happens, so
/// prefixing twice yields a doubled prefix.
///
/// # Examples
/// ```
/// use nhl_core::parser::prefix_keys;
/// use serde_json::json;
///
/// let map = json!({"id": 1}).as_object().cloned().unwrap();
/// let prefixed = prefix_keys("away_", map);
/// assert_eq!(prefixed.get("away_id"), Some(&json!(1)));
/// ```
pub fn prefix_keys(prefix: &str, map: Map<String, Value>) -> Map<String, Value> {
    map.into_iter()
        .map(|(key, value)| (format!("{prefix}{key}"), value))
        .collect()
}

/// Split a mapping into the entries whose key is in `fields` and the names
/// of the keys that are not.
pub fn partition_fields(
    map: &Map<String, Value>,
    fields: &[&str],
) -> (Map<String, Value>, Vec<String>) {
    let mut kept = Map::new();
    let mut ignored = Vec::new();

    for (key, value) in map {
        if fields.contains(&key.as_str()) {
            kept.insert(key.clone(), value.clone());
        } else {
            ignored.push(key.clone());
        }
    }

    (kept, ignored)
}

/// Restrict a mapping to the keys listed in `fields`.
///
/// Unknown keys never fail extraction; they are reported at debug level
/// under the record name and dropped.
pub fn filter_fields(
    map: &Map<String, Value>,
    fields: &[&str],
    record: &str,
) -> Map<String, Value> {
    let (kept, ignored) = partition_fields(map, fields);
    if !ignored.is_empty() {
        debug!(record, ?ignored, "ignoring fields not defined on record");
    }
    kept
}

/// Merge partial mappings; later sources override earlier ones.
pub fn merge<I>(parts: I) -> Map<String, Value>
where
    I: IntoIterator<Item = Map<String, Value>>,
{
    let mut merged = Map::new();
    for part in parts {
        merged.extend(part);
    }
    merged
}

/// Clone of the mapping stored under `key`, or an empty mapping when the key
/// is missing or holds something else.
pub fn sub_map(map: &Map<String, Value>, key: &str) -> Map<String, Value> {
    match map.get(key) {
        Some(Value::Object(inner)) => inner.clone(),
        _ => Map::new(),
    }
}

/// Rename keys according to `(from, to)` pairs. A key that is already
/// present under its target name is left alone.
pub fn rename_keys(mut map: Map<String, Value>, aliases: &[(&str, &str)]) -> Map<String, Value> {
    for (from, to) in aliases {
        if map.contains_key(*to) {
            continue;
        }
        if let Some(value) = map.remove(*from) {
            map.insert((*to).to_string(), value);
        }
    }
    map
}
