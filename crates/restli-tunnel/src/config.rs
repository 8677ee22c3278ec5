use regex::Regex;
use restli_core::{FieldPath, IssueSeverity, StructuredIssue};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, warn};

/// Longest untunneled request (path, `?`, query and body) sent as-is.
pub const DEFAULT_MAX_REQUEST_LENGTH: usize = 4000;

/// Common request-line cap on servers and proxies; larger budgets risk 414s.
const REQUEST_LINE_SOFT_LIMIT: usize = 8192;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TunnelConfig {
    #[serde(default = "default_tunnel_schema")]
    pub schema: String,
    #[serde(default = "default_max_request_length")]
    pub max_request_length: usize,
}

impl Default for TunnelConfig {
    fn default() -> Self {
        Self {
            schema: default_tunnel_schema(),
            max_request_length: DEFAULT_MAX_REQUEST_LENGTH,
        }
    }
}

impl TunnelConfig {
    pub fn with_max_request_length(max_request_length: usize) -> Self {
        Self {
            max_request_length,
            ..Self::default()
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TunnelConfigError {
    #[error("read tunnel config failed `{path}`: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("tunnel config parse failed: {0}")]
    Parse(String),
    #[error("tunnel config validation failed: {0:?}")]
    Validation(Vec<StructuredIssue>),
}

pub fn load_tunnel_config(path: &Path) -> Result<TunnelConfig, TunnelConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| TunnelConfigError::ReadFile {
        path: path.display().to_string(),
        source,
    })?;
    let extension = path.extension().and_then(|ext| ext.to_str());
    let config = parse_tunnel_config(raw.as_str(), extension)?;
    debug!(
        path = %path.display(),
        max_request_length = config.max_request_length,
        "loaded tunnel config"
    );
    Ok(config)
}

/// `extension` picks the decoder (`json`, `yaml`/`yml`); anything else tries
/// YAML first, then JSON.
pub fn parse_tunnel_config(
    raw: &str,
    extension: Option<&str>,
) -> Result<TunnelConfig, TunnelConfigError> {
    let expanded = expand_env_placeholders(raw)?;
    let config = decode_config(expanded.as_str(), extension)?;

    let (errors, warnings): (Vec<_>, Vec<_>) = validate_tunnel_config(&config)
        .into_iter()
        .partition(|issue| issue.severity == IssueSeverity::Error);
    for issue in &warnings {
        warn!(field = %issue.field_path, "{}", issue.message);
    }
    if !errors.is_empty() {
        return Err(TunnelConfigError::Validation(errors));
    }
    Ok(config)
}

fn decode_config(text: &str, extension: Option<&str>) -> Result<TunnelConfig, TunnelConfigError> {
    let invalid = |format: &str, error: &dyn std::fmt::Display| {
        TunnelConfigError::Parse(format!("invalid {format} tunnel config: {error}"))
    };
    let as_json = || {
        serde_json::from_str::<TunnelConfig>(text).map_err(|error| invalid("json", &error))
    };
    let as_yaml = || {
        serde_yaml::from_str::<TunnelConfig>(text).map_err(|error| invalid("yaml", &error))
    };
    match extension.map(str::to_ascii_lowercase).as_deref() {
        Some("json") => as_json(),
        Some("yaml" | "yml") => as_yaml(),
        _ => as_yaml().or_else(|yaml_error| as_json().map_err(|_| yaml_error)),
    }
}

pub fn validate_tunnel_config(config: &TunnelConfig) -> Vec<StructuredIssue> {
    let mut issues = Vec::<StructuredIssue>::new();
    if config.schema != default_tunnel_schema() {
        issues.push(config_issue(
            "tunnel.config.schema",
            "schema",
            format!(
                "unsupported tunnel config schema `{}` (expected `{}`)",
                config.schema,
                default_tunnel_schema()
            ),
        ));
    }
    if config.max_request_length == 0 {
        issues.push(config_issue(
            "tunnel.config.max_request_length",
            "max_request_length",
            "max_request_length must be > 0".to_string(),
        ));
    } else if config.max_request_length > REQUEST_LINE_SOFT_LIMIT {
        let mut issue = config_issue(
            "tunnel.config.max_request_length.soft_limit",
            "max_request_length",
            format!(
                "max_request_length {} exceeds the common {} byte request-line limit",
                config.max_request_length, REQUEST_LINE_SOFT_LIMIT
            ),
        );
        issue.severity = IssueSeverity::Warning;
        issues.push(issue);
    }
    StructuredIssue::sort_stable(&mut issues);
    issues
}

fn config_issue(reference: &str, field: &str, message: String) -> StructuredIssue {
    StructuredIssue::error(
        "tunnel_config_error",
        FieldPath::from_keys([field]),
        message,
        reference,
    )
}

fn default_tunnel_schema() -> String {
    "restli-tunnel/0.0.1".to_string()
}

fn default_max_request_length() -> usize {
    DEFAULT_MAX_REQUEST_LENGTH
}

fn env_placeholder() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]*)\}").expect("valid regex"))
}

/// Replaces every `${NAME}` with the value of the environment variable.
fn expand_env_placeholders(input: &str) -> Result<String, TunnelConfigError> {
    let mut out = String::with_capacity(input.len());
    let mut copied = 0;
    for captures in env_placeholder().captures_iter(input) {
        let (Some(whole), Some(name)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        out.push_str(&input[copied..whole.start()]);
        let name = name.as_str();
        if name.is_empty() {
            return Err(TunnelConfigError::Parse("empty env placeholder `${}`".to_string()));
        }
        let value = std::env::var(name)
            .map_err(|_| TunnelConfigError::Parse(format!("env var `{name}` is not set")))?;
        out.push_str(value.as_str());
        copied = whole.end();
    }
    let rest = &input[copied..];
    if rest.contains("${") {
        return Err(TunnelConfigError::Parse("unterminated env placeholder `${...`".to_string()));
    }
    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
