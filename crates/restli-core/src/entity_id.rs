use crate::codec::{
    encode_map, encode_value, escape, EncodingError, PATH_SEGMENT_RESERVED, QUERY_VALUE_RESERVED,
};
use serde_json::{Map, Value};

/// Resource identifier: a single value, or a complex key made of named parts.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityId {
    Simple(Value),
    Complex(Map<String, Value>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdPlacement {
    Path,
    Query,
}

impl EntityId {
    pub fn is_absent(&self) -> bool {
        matches!(self, EntityId::Simple(Value::Null))
    }

    fn as_value(&self) -> Value {
        match self {
            EntityId::Simple(value) => value.clone(),
            EntityId::Complex(fields) => Value::Object(fields.clone()),
        }
    }
}

impl From<Value> for EntityId {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(fields) => EntityId::Complex(fields),
            other => EntityId::Simple(other),
        }
    }
}

impl From<Map<String, Value>> for EntityId {
    fn from(fields: Map<String, Value>) -> Self {
        EntityId::Complex(fields)
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        EntityId::Simple(Value::String(id.to_string()))
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        EntityId::Simple(Value::String(id))
    }
}

impl From<i64> for EntityId {
    fn from(id: i64) -> Self {
        EntityId::Simple(Value::from(id))
    }
}

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        EntityId::Simple(Value::from(id))
    }
}

/// Returns `None` for an absent id so callers emit no path segment at all.
pub fn encode_entity_id(
    id: &EntityId,
    placement: IdPlacement,
) -> Result<Option<String>, EncodingError> {
    let token = match id {
        EntityId::Simple(Value::Null) => return Ok(None),
        EntityId::Simple(Value::Object(fields)) | EntityId::Complex(fields) => {
            if placement == IdPlacement::Path {
                return Err(EncodingError::ComplexKeyInPath);
            }
            encode_map(fields)?
        }
        EntityId::Simple(value) => encode_value(value)?,
    };
    let reserved = match placement {
        IdPlacement::Path => PATH_SEGMENT_RESERVED,
        IdPlacement::Query => QUERY_VALUE_RESERVED,
    };
    Ok(Some(escape(&token, reserved)))
}

/// Value for the `ids` parameter of batch verbs.
pub fn batch_ids_value(ids: &[EntityId]) -> Value {
    Value::Array(ids.iter().map(EntityId::as_value).collect())
}

#[cfg(test)]
#[path = "entity_id_test.rs"]
mod tests;
