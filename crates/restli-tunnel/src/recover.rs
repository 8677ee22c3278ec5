use crate::method::{
    HttpMethod, UnknownHttpMethod, CONTENT_TYPE_HEADER, FORM_CONTENT_TYPE, JSON_CONTENT_TYPE,
    METHOD_OVERRIDE_HEADER, MULTIPART_MIXED_CONTENT_TYPE,
};
use crate::tunnel::TunnelDecision;

/// The request a server reconstructs from a (possibly tunneled) decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveredRequest {
    pub method: HttpMethod,
    pub path: String,
    pub query: String,
    pub body: Option<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecoverError {
    #[error(transparent)]
    UnknownMethod(#[from] UnknownHttpMethod),
    #[error("tunneled request has no body")]
    MissingBody,
    #[error("tunneled request has no content type")]
    MissingContentType,
    #[error("unsupported tunneled content type `{0}`")]
    UnsupportedContentType(String),
    #[error("malformed multipart body: {0}")]
    MalformedMultipart(&'static str),
    #[error("tunneled payload is not valid utf-8")]
    InvalidUtf8,
}

pub fn recover_tunneled(decision: &TunnelDecision) -> Result<RecoveredRequest, RecoverError> {
    let Some(original) = decision.extra_headers.get(METHOD_OVERRIDE_HEADER) else {
        let (path, query) = decision
            .url
            .split_once('?')
            .unwrap_or((decision.url.as_str(), ""));
        return Ok(RecoveredRequest {
            method: decision.method,
            path: path.to_string(),
            query: query.to_string(),
            body: decision.body.clone(),
        });
    };

    let method = original.parse::<HttpMethod>()?;
    let content_type = decision
        .extra_headers
        .get(CONTENT_TYPE_HEADER)
        .ok_or(RecoverError::MissingContentType)?;
    let payload = decision.body.as_deref().ok_or(RecoverError::MissingBody)?;

    let (query, body) = if media_type(content_type) == FORM_CONTENT_TYPE {
        (utf8(payload)?, None)
    } else if media_type(content_type) == MULTIPART_MIXED_CONTENT_TYPE {
        let boundary = boundary_param(content_type)
            .ok_or(RecoverError::MalformedMultipart("missing boundary parameter"))?;
        let mut query = None;
        let mut body = None;
        for (part_type, part) in split_multipart(payload, boundary)? {
            match part_type.as_str() {
                FORM_CONTENT_TYPE => query = Some(utf8(part)?),
                JSON_CONTENT_TYPE => body = Some(part.to_vec()),
                _ => return Err(RecoverError::UnsupportedContentType(part_type.clone())),
            }
        }
        let query = query.ok_or(RecoverError::MalformedMultipart("missing form part"))?;
        (query, body)
    } else {
        return Err(RecoverError::UnsupportedContentType(content_type.clone()));
    };

    Ok(RecoveredRequest {
        method,
        path: decision.url.clone(),
        query,
        body,
    })
}

fn split_multipart<'a>(
    payload: &'a [u8],
    boundary: &str,
) -> Result<Vec<(String, &'a [u8])>, RecoverError> {
    let opening = format!("--{boundary}\r\n");
    let delimiter = format!("\r\n--{boundary}");
    let mut rest = payload
        .strip_prefix(opening.as_bytes())
        .ok_or(RecoverError::MalformedMultipart("missing opening boundary"))?;

    let mut parts = Vec::new();
    loop {
        let header_end = find(rest, b"\r\n\r\n")
            .ok_or(RecoverError::MalformedMultipart("part headers are not terminated"))?;
        let headers =
            std::str::from_utf8(&rest[..header_end]).map_err(|_| RecoverError::InvalidUtf8)?;
        let part_type = part_content_type(headers)
            .ok_or(RecoverError::MalformedMultipart("part without content type"))?;
        let content = &rest[header_end + 4..];
        let end = find(content, delimiter.as_bytes())
            .ok_or(RecoverError::MalformedMultipart("unterminated part"))?;
        parts.push((part_type, &content[..end]));

        let tail = &content[end + delimiter.len()..];
        if tail.starts_with(b"--") {
            return Ok(parts);
        }
        rest = tail
            .strip_prefix(b"\r\n")
            .ok_or(RecoverError::MalformedMultipart("missing line break after boundary"))?;
    }
}

fn part_content_type(headers: &str) -> Option<String> {
    headers.split("\r\n").find_map(|line| {
        let (name, value) = line.split_once(':')?;
        name.trim()
            .eq_ignore_ascii_case(CONTENT_TYPE_HEADER)
            .then(|| media_type(value).to_string())
    })
}

fn media_type(content_type: &str) -> &str {
    content_type.split(';').next().unwrap_or_default().trim()
}

fn boundary_param(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        name.trim()
            .eq_ignore_ascii_case("boundary")
            .then(|| value.trim().trim_matches('"'))
    })
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|window| window == needle)
}

fn utf8(bytes: &[u8]) -> Result<String, RecoverError> {
    String::from_utf8(bytes.to_vec()).map_err(|_| RecoverError::InvalidUtf8)
}

#[cfg(test)]
#[path = "recover_test.rs"]
mod tests;
