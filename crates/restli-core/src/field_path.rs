use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FieldPathSegment {
    Key(String),
    Index(usize),
}

/// Location of a node inside a structured value, rendered as `$.a[0].b`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FieldPath {
    segments: Vec<FieldPathSegment>,
}

impl FieldPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn from_keys<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self {
            segments: keys
                .into_iter()
                .map(|key| FieldPathSegment::Key(key.into()))
                .collect(),
        }
    }

    pub fn push_key(&mut self, key: impl Into<String>) {
        self.segments.push(FieldPathSegment::Key(key.into()));
    }

    pub fn push_index(&mut self, index: usize) {
        self.segments.push(FieldPathSegment::Index(index));
    }

    pub fn pop(&mut self) -> Option<FieldPathSegment> {
        self.segments.pop()
    }

    pub fn child_key(&self, key: impl Into<String>) -> Self {
        let mut out = self.clone();
        out.push_key(key);
        out
    }

    pub fn segments(&self) -> &[FieldPathSegment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "$")?;
        for segment in &self.segments {
            match segment {
                FieldPathSegment::Key(key) if is_plain_key(key) => write!(f, ".{key}")?,
                FieldPathSegment::Key(key) => write!(f, "[{key:?}]")?,
                FieldPathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

fn is_plain_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '$')
}

#[cfg(test)]
#[path = "field_path_test.rs"]
mod tests;
