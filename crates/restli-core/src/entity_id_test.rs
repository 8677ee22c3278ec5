use super::{batch_ids_value, encode_entity_id, EntityId, IdPlacement};
use crate::codec::EncodingError;
use serde_json::{json, Value};

#[test]
fn numeric_id_encodes_as_plain_segment() {
    let token = encode_entity_id(&EntityId::from(123_i64), IdPlacement::Path).expect("must encode");
    assert_eq!(token.as_deref(), Some("123"));
}

#[test]
fn urn_id_escapes_colons_for_the_path() {
    let id = EntityId::from("urn:li:sponsoredAccount:1");
    let token = encode_entity_id(&id, IdPlacement::Path).expect("must encode");
    assert_eq!(token.as_deref(), Some("urn%3Ali%3AsponsoredAccount%3A1"));
}

#[test]
fn path_placement_escapes_slashes_and_query_separators() {
    let id = EntityId::from("a/b?c=d&e+f");
    let path = encode_entity_id(&id, IdPlacement::Path).expect("must encode");
    assert_eq!(path.as_deref(), Some("a%2Fb%3Fc%3Dd%26e%2Bf"));

    let query = encode_entity_id(&id, IdPlacement::Query).expect("must encode");
    assert_eq!(query.as_deref(), Some("a/b?c%3Dd%26e%2Bf"));
}

#[test]
fn null_id_produces_no_segment() {
    let id = EntityId::Simple(Value::Null);
    assert!(id.is_absent());
    assert_eq!(encode_entity_id(&id, IdPlacement::Path).expect("must encode"), None);
    assert_eq!(encode_entity_id(&id, IdPlacement::Query).expect("must encode"), None);
}

#[test]
fn empty_string_id_is_not_absent() {
    let id = EntityId::from("");
    assert!(!id.is_absent());
    let token = encode_entity_id(&id, IdPlacement::Path).expect("must encode");
    assert_eq!(token.as_deref(), Some("''"));
}

#[test]
fn complex_key_encodes_as_sorted_map_in_query() {
    let id = EntityId::from(json!({"member": "urn:li:person:1", "account": 7}));
    assert!(matches!(id, EntityId::Complex(_)));
    let token = encode_entity_id(&id, IdPlacement::Query).expect("must encode");
    assert_eq!(token.as_deref(), Some("(account:7,member:urn%3Ali%3Aperson%3A1)"));
}

#[test]
fn complex_key_is_rejected_in_path() {
    let id = EntityId::from(json!({"a": 1}));
    let error = encode_entity_id(&id, IdPlacement::Path).expect_err("must reject");
    assert_eq!(error, EncodingError::ComplexKeyInPath);

    let simple_object = EntityId::Simple(json!({"a": 1}));
    let error = encode_entity_id(&simple_object, IdPlacement::Path).expect_err("must reject");
    assert_eq!(error, EncodingError::ComplexKeyInPath);
}

#[test]
fn batch_ids_mix_simple_and_complex_keys() {
    let ids = vec![
        EntityId::from(1_i64),
        EntityId::from("x"),
        EntityId::from(json!({"b": 2, "a": 1})),
    ];
    assert_eq!(batch_ids_value(&ids), json!([1, "x", {"a": 1, "b": 2}]));
}
