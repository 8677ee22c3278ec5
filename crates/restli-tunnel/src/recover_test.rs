use super::{recover_tunneled, RecoverError, RecoveredRequest};
use crate::config::TunnelConfig;
use crate::method::{HttpMethod, RestliMethod, CONTENT_TYPE_HEADER, METHOD_OVERRIDE_HEADER};
use crate::tunnel::{maybe_tunnel, TunnelDecision, TunnelRequest};
use std::collections::BTreeMap;

fn tunneled(headers: &[(&str, &str)], body: &[u8]) -> TunnelDecision {
    TunnelDecision {
        method: HttpMethod::Post,
        url: "/r".to_string(),
        body: Some(body.to_vec()),
        extra_headers: headers
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect::<BTreeMap<_, _>>(),
    }
}

#[test]
fn untunneled_decision_splits_url() {
    let request = TunnelRequest::new(RestliMethod::Finder, "/adAccounts", "q=search");
    let decision = maybe_tunnel(&request, &TunnelConfig::default());
    let recovered = recover_tunneled(&decision).expect("must recover");
    assert_eq!(
        recovered,
        RecoveredRequest {
            method: HttpMethod::Get,
            path: "/adAccounts".to_string(),
            query: "q=search".to_string(),
            body: None,
        }
    );
}

#[test]
fn form_tunnel_recovers_original_request() {
    let query = "ids=List(1,2,3)&fields=id,name";
    let request = TunnelRequest::new(RestliMethod::BatchGet, "/adCampaigns", query);
    let decision = maybe_tunnel(&request, &TunnelConfig::with_max_request_length(8));
    assert!(decision.is_tunneled());

    let recovered = recover_tunneled(&decision).expect("must recover");
    assert_eq!(recovered.method, HttpMethod::Get);
    assert_eq!(recovered.path, "/adCampaigns");
    assert_eq!(recovered.query, query);
    assert_eq!(recovered.body, None);
}

#[test]
fn multipart_body_with_line_breaks_survives() {
    let body = b"{\"note\":\"line one\r\n\r\nline two\"}";
    let request =
        TunnelRequest::new(RestliMethod::PartialUpdate, "/r/1", "fields=note").with_body(body);
    let decision = maybe_tunnel(&request, &TunnelConfig::with_max_request_length(8));

    let recovered = recover_tunneled(&decision).expect("must recover");
    assert_eq!(recovered.method, HttpMethod::Post);
    assert_eq!(recovered.path, "/r/1");
    assert_eq!(recovered.query, "fields=note");
    assert_eq!(recovered.body.as_deref(), Some(&body[..]));
}

#[test]
fn unknown_override_method_is_rejected() {
    let decision = tunneled(
        &[
            (METHOD_OVERRIDE_HEADER, "PATCH"),
            (CONTENT_TYPE_HEADER, "application/x-www-form-urlencoded"),
        ],
        b"a=1",
    );
    let error = recover_tunneled(&decision).expect_err("must reject");
    assert!(matches!(error, RecoverError::UnknownMethod(_)));
}

#[test]
fn missing_content_type_and_body_are_rejected() {
    let decision = tunneled(&[(METHOD_OVERRIDE_HEADER, "GET")], b"a=1");
    assert_eq!(recover_tunneled(&decision), Err(RecoverError::MissingContentType));

    let mut decision = tunneled(
        &[
            (METHOD_OVERRIDE_HEADER, "GET"),
            (CONTENT_TYPE_HEADER, "application/x-www-form-urlencoded"),
        ],
        b"",
    );
    decision.body = None;
    assert_eq!(recover_tunneled(&decision), Err(RecoverError::MissingBody));
}

#[test]
fn unsupported_content_type_is_rejected() {
    let decision = tunneled(
        &[(METHOD_OVERRIDE_HEADER, "GET"), (CONTENT_TYPE_HEADER, "text/plain")],
        b"a=1",
    );
    assert_eq!(
        recover_tunneled(&decision),
        Err(RecoverError::UnsupportedContentType("text/plain".to_string()))
    );
}

#[test]
fn malformed_multipart_is_rejected() {
    let decision = tunneled(
        &[(METHOD_OVERRIDE_HEADER, "PUT"), (CONTENT_TYPE_HEADER, "multipart/mixed")],
        b"--x\r\n",
    );
    assert_eq!(
        recover_tunneled(&decision),
        Err(RecoverError::MalformedMultipart("missing boundary parameter"))
    );

    let decision = tunneled(
        &[(METHOD_OVERRIDE_HEADER, "PUT"), (CONTENT_TYPE_HEADER, "multipart/mixed; boundary=x")],
        b"--x\r\nContent-Type: application/x-www-form-urlencoded\r\n\r\na=1",
    );
    assert_eq!(
        recover_tunneled(&decision),
        Err(RecoverError::MalformedMultipart("unterminated part"))
    );

    let decision = tunneled(
        &[(METHOD_OVERRIDE_HEADER, "PUT"), (CONTENT_TYPE_HEADER, "multipart/mixed; boundary=x")],
        b"--x\r\nContent-Type: application/json\r\n\r\n{}\r\n--x--\r\n",
    );
    assert_eq!(
        recover_tunneled(&decision),
        Err(RecoverError::MalformedMultipart("missing form part"))
    );
}
