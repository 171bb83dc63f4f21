//! Loose-input field resolution.
//!
//! Request bodies arrive as arbitrary JSON with several generations of key
//! names for the same field. Every accessor here takes an ordered alias list
//! (canonical key first, legacy names after) and coerces whatever it finds
//! into the target type, falling back to a safe default. Nothing in this
//! module ever errors: validation of the wire payload belongs to the request
//! boundary, not the normalizer.

use serde_json::{Map, Value};

/// Resolves the first alias that is present with a non-null value.
fn lookup<'a>(body: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    let map = body.as_object()?;
    keys.iter()
        .filter_map(|key| map.get(*key))
        .find(|value| !value.is_null())
}

pub fn string_field(body: &Value, keys: &[&str]) -> String {
    string_field_or(body, keys, "")
}

pub fn string_field_or(body: &Value, keys: &[&str], default: &str) -> String {
    match lookup(body, keys) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => default.to_string(),
    }
}

pub fn uint_field(body: &Value, keys: &[&str]) -> u64 {
    match lookup(body, keys) {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().map(|f| if f > 0.0 { f as u64 } else { 0 }))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

pub fn float_field(body: &Value, keys: &[&str]) -> f64 {
    let value = match lookup(body, keys) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    };
    value.max(0.0)
}

pub fn bool_field(body: &Value, keys: &[&str]) -> bool {
    matches!(lookup(body, keys), Some(Value::Bool(true)))
}

/// List coerced element-by-element into display strings.
pub fn string_list_field(body: &Value, keys: &[&str]) -> Vec<String> {
    match lookup(body, keys) {
        Some(Value::Array(items)) => items.iter().map(display_string).collect(),
        _ => Vec::new(),
    }
}

/// List kept as raw values; callers that render these use [`display_string`].
pub fn value_list_field(body: &Value, keys: &[&str]) -> Vec<Value> {
    match lookup(body, keys) {
        Some(Value::Array(items)) => items.clone(),
        _ => Vec::new(),
    }
}

/// Order-preserving mapping (serde_json is built with `preserve_order`).
pub fn map_field(body: &Value, keys: &[&str]) -> Map<String, Value> {
    match lookup(body, keys) {
        Some(Value::Object(map)) => map.clone(),
        _ => Map::new(),
    }
}

/// Human-readable form of a loose value: strings verbatim, structured items
/// by their `description` member, anything else as its JSON text.
pub fn display_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Object(map) => match map.get("description") {
            Some(Value::String(s)) => s.clone(),
            _ => Value::Object(map.clone()).to_string(),
        },
        other => other.to_string(),
    }
}

/// Location is a derived field: a direct `location` key wins; otherwise it is
/// composed from `businessCity` and `businessState`, or the city alone.
pub fn location_field(body: &Value) -> String {
    let direct = string_field(body, &["location"]);
    if !direct.trim().is_empty() {
        return direct;
    }
    let city = string_field(body, &["businessCity"]);
    let state = string_field(body, &["businessState"]);
    match (city.trim().is_empty(), state.trim().is_empty()) {
        (false, false) => format!("{city}, {state}"),
        (false, true) => city,
        _ => String::new(),
    }
}
