mod apply;
mod document;
mod generate;

pub use apply::{apply_patch, PatchApplyAudit, PatchApplyError};
pub use document::{PartialUpdateBody, PatchDocument, PatchError, DELETE_KEY, PATCH_KEY, SET_KEY};
pub use generate::{generate_patch, generate_patch_serialized, patch_from_set_fields};
