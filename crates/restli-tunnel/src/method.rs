use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub const METHOD_OVERRIDE_HEADER: &str = "X-HTTP-Method-Override";
pub const CONTENT_TYPE_HEADER: &str = "Content-Type";

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const MULTIPART_MIXED_CONTENT_TYPE: &str = "multipart/mixed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl Display for HttpMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown http method `{0}`")]
pub struct UnknownHttpMethod(pub String);

impl FromStr for HttpMethod {
    type Err = UnknownHttpMethod;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "DELETE" => Ok(HttpMethod::Delete),
            _ => Err(UnknownHttpMethod(input.to_string())),
        }
    }
}

/// Rest.li resource method. Each one maps to a fixed HTTP method and either
/// always or never carries a JSON body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestliMethod {
    Get,
    BatchGet,
    GetAll,
    Finder,
    BatchFinder,
    Create,
    BatchCreate,
    Update,
    BatchUpdate,
    PartialUpdate,
    BatchPartialUpdate,
    Delete,
    BatchDelete,
    Action,
}

impl RestliMethod {
    pub const ALL: [RestliMethod; 14] = [
        RestliMethod::Get,
        RestliMethod::BatchGet,
        RestliMethod::GetAll,
        RestliMethod::Finder,
        RestliMethod::BatchFinder,
        RestliMethod::Create,
        RestliMethod::BatchCreate,
        RestliMethod::Update,
        RestliMethod::BatchUpdate,
        RestliMethod::PartialUpdate,
        RestliMethod::BatchPartialUpdate,
        RestliMethod::Delete,
        RestliMethod::BatchDelete,
        RestliMethod::Action,
    ];

    pub fn http_method(self) -> HttpMethod {
        match self {
            RestliMethod::Get
            | RestliMethod::BatchGet
            | RestliMethod::GetAll
            | RestliMethod::Finder
            | RestliMethod::BatchFinder => HttpMethod::Get,
            RestliMethod::Create
            | RestliMethod::BatchCreate
            | RestliMethod::PartialUpdate
            | RestliMethod::BatchPartialUpdate
            | RestliMethod::Action => HttpMethod::Post,
            RestliMethod::Update | RestliMethod::BatchUpdate => HttpMethod::Put,
            RestliMethod::Delete | RestliMethod::BatchDelete => HttpMethod::Delete,
        }
    }

    pub fn carries_body(self) -> bool {
        matches!(self.http_method(), HttpMethod::Post | HttpMethod::Put)
    }

    /// Value of the `X-RestLi-Method` header.
    pub fn wire_name(self) -> &'static str {
        match self {
            RestliMethod::Get => "get",
            RestliMethod::BatchGet => "batch_get",
            RestliMethod::GetAll => "get_all",
            RestliMethod::Finder => "finder",
            RestliMethod::BatchFinder => "batch_finder",
            RestliMethod::Create => "create",
            RestliMethod::BatchCreate => "batch_create",
            RestliMethod::Update => "update",
            RestliMethod::BatchUpdate => "batch_update",
            RestliMethod::PartialUpdate => "partial_update",
            RestliMethod::BatchPartialUpdate => "batch_partial_update",
            RestliMethod::Delete => "delete",
            RestliMethod::BatchDelete => "batch_delete",
            RestliMethod::Action => "action",
        }
    }
}

impl Display for RestliMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_name())
    }
}

#[cfg(test)]
#[path = "method_test.rs"]
mod tests;
