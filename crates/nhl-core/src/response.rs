//! Minimal response wrapper returned by the transport client.

use serde_json::{Map, Value};
use tracing::debug;

/// Status code plus the decoded JSON object of a successful request.
///
/// `data` is empty when the body was missing, was not JSON, or was a JSON
/// document other than an object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Response {
    /// HTTP status code
    pub status_code: u16,
    /// Decoded JSON object
    pub data: Map<String, Value>,
}

impl Response {
    /// Create a response from an already decoded mapping.
    pub fn new(status_code: u16, data: Map<String, Value>) -> Self {
        Self { status_code, data }
    }

    /// Create a response from a raw body, decoding it as JSON if possible.
    pub fn from_body(status_code: u16, body: &[u8]) -> Self {
        Self::new(status_code, decode_body(body))
    }

    /// Array stored under `key`, if present.
    pub fn array(&self, key: &str) -> Option<&Vec<Value>> {
        self.data.get(key).and_then(Value::as_array)
    }

    /// Whether the decoded body carried no data.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

fn decode_body(body: &[u8]) -> Map<String, Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Map::new();
    }

    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => map,
        Ok(other) => {
            debug!(kind = json_kind(&other), "response body is not a JSON object");
            Map::new()
        }
        Err(e) => {
            debug!(error = %e, "response body is not JSON");
            Map::new()
        }
    }
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
