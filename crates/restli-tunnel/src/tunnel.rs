use crate::config::TunnelConfig;
use crate::method::{
    HttpMethod, RestliMethod, CONTENT_TYPE_HEADER, FORM_CONTENT_TYPE, JSON_CONTENT_TYPE,
    METHOD_OVERRIDE_HEADER, MULTIPART_MIXED_CONTENT_TYPE,
};
use restli_core::sha256_hex;
use std::collections::BTreeMap;
use tracing::{debug, warn};

pub(crate) const BOUNDARY_PREFIX: &str = "restli-tunnel-";

/// A fully encoded request before the tunneling decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TunnelRequest<'a> {
    pub method: RestliMethod,
    pub path: &'a str,
    /// Encoded query string without the leading `?`.
    pub query: &'a str,
    /// Serialized JSON body. Counted toward the length only for verbs that
    /// carry one; a body on any other verb is forwarded untouched when the
    /// request passes through and dropped when it is tunneled.
    pub body: Option<&'a [u8]>,
}

impl<'a> TunnelRequest<'a> {
    pub fn new(method: RestliMethod, path: &'a str, query: &'a str) -> Self {
        Self {
            method,
            path,
            query,
            body: None,
        }
    }

    pub fn with_body(mut self, body: &'a [u8]) -> Self {
        self.body = Some(body);
        self
    }

    fn tunneled_body(&self) -> Option<&'a [u8]> {
        match self.body {
            Some(_) if !self.method.carries_body() => {
                warn!(method = %self.method, "dropping body supplied for a verb without one");
                None
            }
            body => body,
        }
    }

    /// Length of the untunneled form: path, `?` and query when present, and
    /// the body when the verb carries one.
    pub fn untunneled_length(&self) -> usize {
        let query = if self.query.is_empty() {
            0
        } else {
            1 + self.query.len()
        };
        let body = if self.method.carries_body() {
            self.body.map_or(0, <[u8]>::len)
        } else {
            0
        };
        self.path.len() + query + body
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TunnelDecision {
    pub method: HttpMethod,
    pub url: String,
    pub body: Option<Vec<u8>>,
    pub extra_headers: BTreeMap<String, String>,
}

impl TunnelDecision {
    pub fn is_tunneled(&self) -> bool {
        self.extra_headers.contains_key(METHOD_OVERRIDE_HEADER)
    }
}

/// Rewrites requests longer than `config.max_request_length` into a POST
/// carrying the query in the body. Shorter requests, and requests with no
/// query to move, pass through untouched.
pub fn maybe_tunnel(request: &TunnelRequest<'_>, config: &TunnelConfig) -> TunnelDecision {
    let length = request.untunneled_length();
    let original = request.method.http_method();

    if length <= config.max_request_length || request.query.is_empty() {
        debug!(
            method = %request.method,
            length,
            max = config.max_request_length,
            "request within budget, sending untunneled"
        );
        let url = if request.query.is_empty() {
            request.path.to_string()
        } else {
            format!("{}?{}", request.path, request.query)
        };
        return TunnelDecision {
            method: original,
            url,
            body: request.body.map(<[u8]>::to_vec),
            extra_headers: BTreeMap::new(),
        };
    }

    let body = request.tunneled_body();

    let mut extra_headers = BTreeMap::new();
    extra_headers.insert(METHOD_OVERRIDE_HEADER.to_string(), original.as_str().to_string());
    let tunneled_body = match body {
        None => {
            extra_headers.insert(CONTENT_TYPE_HEADER.to_string(), FORM_CONTENT_TYPE.to_string());
            request.query.as_bytes().to_vec()
        }
        Some(json) => {
            let boundary = multipart_boundary(request.query.as_bytes(), json);
            extra_headers.insert(
                CONTENT_TYPE_HEADER.to_string(),
                format!("{MULTIPART_MIXED_CONTENT_TYPE}; boundary={boundary}"),
            );
            multipart_body(&boundary, request.query.as_bytes(), json)
        }
    };
    debug!(
        method = %request.method,
        length,
        max = config.max_request_length,
        multipart = body.is_some(),
        "request over budget, tunneling query through POST body"
    );

    TunnelDecision {
        method: HttpMethod::Post,
        url: request.path.to_string(),
        body: Some(tunneled_body),
        extra_headers,
    }
}

/// Derived from the payloads so equal inputs always yield equal output;
/// re-derived in the unlikely case a payload already contains it.
fn multipart_boundary(query: &[u8], json: &[u8]) -> String {
    let mut salt = 0u64;
    loop {
        let digest = sha256_hex(&[query, json, &salt.to_be_bytes()]);
        let boundary = format!("{BOUNDARY_PREFIX}{}", &digest[..32]);
        let needle = boundary.as_bytes();
        if !contains(query, needle) && !contains(json, needle) {
            return boundary;
        }
        salt = salt.wrapping_add(1);
    }
}

fn multipart_body(boundary: &str, query: &[u8], json: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(query.len() + json.len() + 4 * boundary.len() + 128);
    for (content_type, payload) in [(FORM_CONTENT_TYPE, query), (JSON_CONTENT_TYPE, json)] {
        let head = format!("--{boundary}\r\n{CONTENT_TYPE_HEADER}: {content_type}\r\n\r\n");
        out.extend_from_slice(head.as_bytes());
        out.extend_from_slice(payload);
        out.extend_from_slice(b"\r\n");
    }
    out.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    out
}

pub(crate) fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    !needle.is_empty() && haystack.windows(needle.len()).any(|window| window == needle)
}

#[cfg(test)]
#[path = "tunnel_test.rs"]
mod tests;
