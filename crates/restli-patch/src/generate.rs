use crate::document::{PatchDocument, PatchError, DELETE_KEY, SET_KEY};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use tracing::debug;

/// Diffs two snapshots of the same entity. Objects present on both sides are
/// diffed recursively; every other value (lists included) is compared whole.
pub fn generate_patch(
    original: &Map<String, Value>,
    modified: &Map<String, Value>,
) -> Result<PatchDocument, PatchError> {
    let document = diff_objects(original, modified);
    if document.is_empty() {
        return Err(PatchError::EmptyPatch);
    }
    debug!(
        set = document.set_fields.len(),
        delete = document.delete_fields.len(),
        nested = document.nested.len(),
        "generated partial update patch"
    );
    Ok(document)
}

/// Same as [`generate_patch`] for any entity type that serializes to a JSON
/// object.
pub fn generate_patch_serialized<T>(original: &T, modified: &T) -> Result<PatchDocument, PatchError>
where
    T: Serialize + ?Sized,
{
    let original = to_object(original, "original")?;
    let modified = to_object(modified, "modified")?;
    generate_patch(&original, &modified)
}

/// Wraps `fields` as a top-level `$set` with no diffing.
pub fn patch_from_set_fields(fields: Map<String, Value>) -> Result<PatchDocument, PatchError> {
    if fields.is_empty() {
        return Err(PatchError::InvalidPatchInput(
            "set fields must contain at least one field".to_string(),
        ));
    }
    if fields.contains_key("") {
        return Err(PatchError::InvalidPatchInput(
            "set field names must be non-empty".to_string(),
        ));
    }
    Ok(PatchDocument {
        set_fields: fields,
        ..PatchDocument::default()
    })
}

fn diff_objects(original: &Map<String, Value>, modified: &Map<String, Value>) -> PatchDocument {
    let before_keys = original.keys().collect::<BTreeSet<_>>();
    let after_keys = modified.keys().collect::<BTreeSet<_>>();

    let mut document = PatchDocument::default();
    for key in before_keys.difference(&after_keys) {
        document.delete_fields.insert((*key).clone());
    }
    for key in after_keys.difference(&before_keys) {
        if let Some(value) = modified.get(*key) {
            document.set_fields.insert((*key).clone(), value.clone());
        }
    }
    for key in before_keys.intersection(&after_keys) {
        let (Some(before), Some(after)) = (original.get(*key), modified.get(*key)) else {
            continue;
        };
        match (before, after) {
            // a nested level under `$set`/`$delete` would collide with the op keys
            (Value::Object(before_fields), Value::Object(after_fields)) if !is_op_key(key) => {
                let nested = diff_objects(before_fields, after_fields);
                if !nested.is_empty() {
                    document.nested.insert((*key).clone(), nested);
                }
            }
            _ if before == after => {}
            _ => {
                document.set_fields.insert((*key).clone(), after.clone());
            }
        }
    }
    document
}

fn is_op_key(key: &str) -> bool {
    key == SET_KEY || key == DELETE_KEY
}

fn to_object<T>(value: &T, side: &str) -> Result<Map<String, Value>, PatchError>
where
    T: Serialize + ?Sized,
{
    match serde_json::to_value(value) {
        Ok(Value::Object(fields)) => Ok(fields),
        Ok(_) => Err(PatchError::InvalidPatchInput(format!(
            "{side} entity must serialize to an object"
        ))),
        Err(error) => Err(PatchError::InvalidPatchInput(format!(
            "{side} entity could not be serialized: {error}"
        ))),
    }
}

#[cfg(test)]
#[path = "generate_test.rs"]
mod tests;
