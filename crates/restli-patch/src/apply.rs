use crate::document::PatchDocument;
use restli_core::FieldPath;
use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatchApplyError {
    #[error("patch target at {path} is not an object")]
    NonObjectTarget { path: FieldPath },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PatchApplyAudit {
    pub set_count: usize,
    pub delete_count: usize,
    pub affected_paths: Vec<String>,
}

/// Applies `patch` to `target` in place the way a Rest.li server does:
/// deletes first, then sets, then nested patches. A nested patch on a
/// missing field starts from an empty object.
pub fn apply_patch(
    target: &mut Value,
    patch: &PatchDocument,
) -> Result<PatchApplyAudit, PatchApplyError> {
    let mut audit = PatchApplyAudit::default();
    apply_level(target, patch, &mut FieldPath::root(), &mut audit)?;
    audit.affected_paths.sort();
    Ok(audit)
}

fn apply_level(
    target: &mut Value,
    patch: &PatchDocument,
    path: &mut FieldPath,
    audit: &mut PatchApplyAudit,
) -> Result<(), PatchApplyError> {
    let Some(object) = target.as_object_mut() else {
        return Err(PatchApplyError::NonObjectTarget { path: path.clone() });
    };

    for field in &patch.delete_fields {
        if object.remove(field).is_some() {
            audit.delete_count += 1;
            audit.affected_paths.push(path.child_key(field.as_str()).to_string());
        }
    }

    for (field, value) in &patch.set_fields {
        object.insert(field.clone(), value.clone());
        audit.set_count += 1;
        audit.affected_paths.push(path.child_key(field.as_str()).to_string());
    }

    for (field, nested) in &patch.nested {
        let child = object
            .entry(field.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        path.push_key(field.as_str());
        apply_level(child, nested, path, audit)?;
        path.pop();
    }

    Ok(())
}

#[cfg(test)]
#[path = "apply_test.rs"]
mod tests;
