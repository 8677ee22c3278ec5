use super::{FieldPath, FieldPathSegment};

#[test]
fn root_renders_as_dollar() {
    let path = FieldPath::root();
    assert!(path.is_root());
    assert_eq!(path.to_string(), "$");
}

#[test]
fn keys_and_indexes_render_in_order() {
    let mut path = FieldPath::root();
    path.push_key("ids");
    path.push_index(2);
    path.push_key("owner");
    assert_eq!(path.to_string(), "$.ids[2].owner");
    assert_eq!(
        path.segments(),
        &[
            FieldPathSegment::Key("ids".to_string()),
            FieldPathSegment::Index(2),
            FieldPathSegment::Key("owner".to_string()),
        ]
    );
}

#[test]
fn keys_with_separators_are_quoted() {
    let path = FieldPath::from_keys(["search", "a.b", ""]);
    assert_eq!(path.to_string(), r#"$.search["a.b"][""]"#);
}

#[test]
fn pop_restores_parent() {
    let parent = FieldPath::from_keys(["patch"]);
    let mut child = parent.child_key("name");
    assert_eq!(child.pop(), Some(FieldPathSegment::Key("name".to_string())));
    assert_eq!(child, parent);
}
