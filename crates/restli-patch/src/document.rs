use restli_core::{stable_json_bytes, FieldPath};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};

pub const SET_KEY: &str = "$set";
pub const DELETE_KEY: &str = "$delete";
pub const PATCH_KEY: &str = "patch";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatchError {
    #[error("original and modified entities are identical, nothing to update")]
    EmptyPatch,
    #[error("invalid patch input: {0}")]
    InvalidPatchInput(String),
    #[error("malformed patch document at {path}: {message}")]
    MalformedDocument { path: FieldPath, message: String },
}

/// Partial update for one object level: fields to overwrite, fields to
/// remove, and per-field patches for nested objects that changed inside.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatchDocument {
    pub(crate) set_fields: Map<String, Value>,
    pub(crate) delete_fields: BTreeSet<String>,
    pub(crate) nested: BTreeMap<String, PatchDocument>,
}

impl PatchDocument {
    pub fn set_fields(&self) -> &Map<String, Value> {
        &self.set_fields
    }

    pub fn delete_fields(&self) -> &BTreeSet<String> {
        &self.delete_fields
    }

    pub fn nested(&self) -> &BTreeMap<String, PatchDocument> {
        &self.nested
    }

    pub fn is_empty(&self) -> bool {
        self.set_fields.is_empty() && self.delete_fields.is_empty() && self.nested.is_empty()
    }

    /// Wire shape: `{"$set": {..}, "$delete": [..], "<field>": {..}}`, empty
    /// parts omitted.
    pub fn to_value(&self) -> Value {
        let mut out = Map::new();
        if !self.set_fields.is_empty() {
            out.insert(SET_KEY.to_string(), Value::Object(self.set_fields.clone()));
        }
        if !self.delete_fields.is_empty() {
            out.insert(
                DELETE_KEY.to_string(),
                Value::Array(self.delete_fields.iter().cloned().map(Value::String).collect()),
            );
        }
        for (field, document) in &self.nested {
            out.insert(field.clone(), document.to_value());
        }
        Value::Object(out)
    }

    pub fn from_value(value: &Value) -> Result<Self, PatchError> {
        parse_document(value, &mut FieldPath::root())
    }
}

impl Serialize for PatchDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

fn parse_document(value: &Value, path: &mut FieldPath) -> Result<PatchDocument, PatchError> {
    let malformed = |path: &FieldPath, message: &str| PatchError::MalformedDocument {
        path: path.clone(),
        message: message.to_string(),
    };
    let Some(object) = value.as_object() else {
        return Err(malformed(path, "patch level must be an object"));
    };

    let mut document = PatchDocument::default();
    for (key, entry) in object {
        path.push_key(key.as_str());
        match key.as_str() {
            SET_KEY => {
                let fields = entry
                    .as_object()
                    .ok_or_else(|| malformed(path, "$set must be an object"))?;
                document.set_fields = fields.clone();
            }
            DELETE_KEY => {
                let fields = entry
                    .as_array()
                    .ok_or_else(|| malformed(path, "$delete must be an array"))?;
                for field in fields {
                    let name = field
                        .as_str()
                        .ok_or_else(|| malformed(path, "$delete entries must be strings"))?;
                    document.delete_fields.insert(name.to_string());
                }
            }
            _ => {
                let nested = parse_document(entry, path)?;
                document.nested.insert(key.clone(), nested);
            }
        }
        path.pop();
    }
    Ok(document)
}

/// Request body of a partial update: `{"patch": <document>}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartialUpdateBody {
    pub patch: PatchDocument,
}

impl PartialUpdateBody {
    pub fn new(patch: PatchDocument) -> Self {
        Self { patch }
    }

    pub fn to_value(&self) -> Value {
        let mut out = Map::new();
        out.insert(PATCH_KEY.to_string(), self.patch.to_value());
        Value::Object(out)
    }

    pub fn to_json_bytes(&self) -> serde_json::Result<Vec<u8>> {
        stable_json_bytes(&self.to_value())
    }
}

#[cfg(test)]
#[path = "document_test.rs"]
mod tests;
