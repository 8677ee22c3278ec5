use crate::codec::EncodingError;
use crate::entity_id::{encode_entity_id, EntityId, IdPlacement};
use regex::{Captures, Regex};
use serde_json::{Map, Value};
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResourcePathError {
    #[error("resource path `{template}` references missing path key `{key}`")]
    MissingPathKey { template: String, key: String },
    #[error("resource path `{0}` has an unterminated or malformed placeholder")]
    MalformedPlaceholder(String),
    #[error("path key `{key}` could not be encoded: {source}")]
    Encoding {
        key: String,
        #[source]
        source: EncodingError,
    },
}

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder pattern must compile")
    })
}

/// Substitutes `{name}` placeholders, e.g. `/adAccounts/{id}/adCampaigns`,
/// with path-encoded keys. A null key counts as missing.
pub fn build_resource_path(
    template: &str,
    path_keys: &Map<String, Value>,
) -> Result<String, ResourcePathError> {
    let mut failure = None;
    let path = placeholder_pattern().replace_all(template, |captures: &Captures<'_>| {
        let key = &captures[1];
        match resolve_path_key(template, key, path_keys) {
            Ok(segment) => segment,
            Err(error) => {
                failure.get_or_insert(error);
                String::new()
            }
        }
    });
    if let Some(error) = failure {
        return Err(error);
    }
    if path.contains('{') || path.contains('}') {
        return Err(ResourcePathError::MalformedPlaceholder(template.to_string()));
    }
    Ok(path.into_owned())
}

fn resolve_path_key(
    template: &str,
    key: &str,
    path_keys: &Map<String, Value>,
) -> Result<String, ResourcePathError> {
    let missing = || ResourcePathError::MissingPathKey {
        template: template.to_string(),
        key: key.to_string(),
    };
    let value = path_keys.get(key).ok_or_else(missing)?;
    let id = EntityId::from(value.clone());
    encode_entity_id(&id, IdPlacement::Path)
        .map_err(|source| ResourcePathError::Encoding {
            key: key.to_string(),
            source,
        })?
        .ok_or_else(missing)
}

/// Appends the id as a final segment. An absent id leaves the path untouched,
/// so singleton and collection resources never get a trailing slash.
pub fn resource_url_path(path: &str, id: Option<&EntityId>) -> Result<String, EncodingError> {
    let segment = match id {
        Some(id) => encode_entity_id(id, IdPlacement::Path)?,
        None => None,
    };
    Ok(match segment {
        Some(segment) => format!("{}/{segment}", path.trim_end_matches('/')),
        None => path.to_string(),
    })
}

#[cfg(test)]
#[path = "resource_path_test.rs"]
mod tests;
