use super::stable_json_bytes;
use serde_json::json;

#[test]
fn object_keys_are_sorted_at_every_level() {
    let value = json!({
        "status": "ACTIVE",
        "name": "X",
        "targeting": {"z": [2, 1], "a": {"y": 1, "b": 2}}
    });
    let bytes = stable_json_bytes(&value).expect("must encode");
    assert_eq!(
        String::from_utf8(bytes).expect("utf8"),
        r#"{"name":"X","status":"ACTIVE","targeting":{"a":{"b":2,"y":1},"z":[2,1]}}"#
    );
}

#[test]
fn key_order_of_the_input_does_not_matter() {
    let left = stable_json_bytes(&json!({"patch": {"$set": {"b": 1, "a": null}}})).expect("left");
    let right = stable_json_bytes(&json!({"patch": {"$set": {"a": null, "b": 1}}})).expect("right");
    assert_eq!(left, right);
}
