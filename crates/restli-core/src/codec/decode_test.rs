use super::{decode_params, decode_value, DecodeError};
use crate::codec::encode_value;
use serde_json::{json, Value};

#[test]
fn decodes_lists_maps_and_empty_string() {
    let value = decode_value("(a:List(1,2),b:'',c:(),d:List())").expect("must decode");
    assert_eq!(value, json!({"a": ["1", "2"], "b": "", "c": {}, "d": []}));
}

#[test]
fn empty_token_is_null() {
    assert_eq!(decode_value("").expect("must decode"), Value::Null);
}

#[test]
fn escapes_are_reversed() {
    let value = decode_value("List(a%28b%29%2Cc%3Ad%27e,caf%C3%A9)").expect("must decode");
    assert_eq!(value, json!(["a(b),c:d'e", "café"]));
}

#[test]
fn reencoding_a_decoded_token_is_idempotent() {
    let original = json!({
        "search": {"name": {"values": ["spring sale", "50% off", ""]}},
        "count": 10,
        "flags": [true, false],
        "nested": [[], {}, {"k:": "v,"}],
        "ratio": 0.25
    });
    let token = encode_value(&original).expect("must encode");
    let decoded = decode_value(&token).expect("must decode");
    assert_eq!(encode_value(&decoded).expect("must re-encode"), token);
}

#[test]
fn string_values_roundtrip_exactly() {
    let original = json!({"name": "a (b), c: 'd'", "tags": ["x", "", "é/ü"]});
    let token = encode_value(&original).expect("must encode");
    assert_eq!(decode_value(&token).expect("must decode"), original);
}

#[test]
fn unterminated_list_is_rejected() {
    let error = decode_value("List(1,2").expect_err("must reject");
    assert_eq!(error, DecodeError::UnexpectedEnd);
}

#[test]
fn trailing_input_is_rejected() {
    let error = decode_value("(a:1)x").expect_err("must reject");
    assert_eq!(error, DecodeError::TrailingInput(5));
}

#[test]
fn map_entry_without_colon_is_rejected() {
    let error = decode_value("(a1)").expect_err("must reject");
    assert_eq!(
        error,
        DecodeError::UnexpectedChar {
            found: ')',
            position: 3
        }
    );
}

#[test]
fn invalid_utf8_escape_is_rejected() {
    let error = decode_value("%FF").expect_err("must reject");
    assert_eq!(error, DecodeError::InvalidUtf8(0));
}

#[test]
fn decode_params_splits_pairs() {
    let params = decode_params("count=10&q=search&search=(name:x%26y)").expect("must decode");
    assert_eq!(params["count"], json!("10"));
    assert_eq!(params["q"], json!("search"));
    assert_eq!(params["search"], json!({"name": "x&y"}));
}

#[test]
fn decode_params_reports_absolute_positions() {
    let error = decode_params("a=1&b=(x:1)z").expect_err("must reject");
    assert_eq!(error, DecodeError::TrailingInput(11));
}

#[test]
fn decode_params_requires_equals() {
    let error = decode_params("a=1&flag").expect_err("must reject");
    assert_eq!(error, DecodeError::MissingParamValue("flag".to_string()));
}
