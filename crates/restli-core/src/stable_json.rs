use serde_json::{Map, Value};

/// Serializes `value` with object keys in ascending code-point order at every
/// level, regardless of whether `serde_json/preserve_order` is enabled in the
/// build graph.
pub fn stable_json_bytes(value: &Value) -> serde_json::Result<Vec<u8>> {
    serde_json::to_vec(&normalize_value(value))
}

fn normalize_value(value: &Value) -> Value {
    match value {
        Value::Object(object) => Value::Object(normalize_object(object)),
        Value::Array(items) => Value::Array(items.iter().map(normalize_value).collect()),
        _ => value.clone(),
    }
}

fn normalize_object(object: &Map<String, Value>) -> Map<String, Value> {
    let mut entries = object.iter().collect::<Vec<_>>();
    entries.sort_by(|left, right| left.0.cmp(right.0));

    let mut out = Map::new();
    for (key, value) in entries {
        out.insert(key.clone(), normalize_value(value));
    }
    out
}

#[cfg(test)]
#[path = "stable_json_test.rs"]
mod tests;
