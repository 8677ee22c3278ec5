use super::{IssueSeverity, StructuredIssue};
use crate::FieldPath;

#[test]
fn issues_are_sorted_by_severity_then_path() {
    let mut issues = vec![
        StructuredIssue {
            kind: "tunnel_config_error".to_string(),
            severity: IssueSeverity::Warning,
            field_path: FieldPath::from_keys(["schema"]),
            message: "second".to_string(),
            reference: None,
        },
        StructuredIssue::error(
            "tunnel_config_error",
            FieldPath::from_keys(["max_request_length"]),
            "third",
            "tunnel.config.max_request_length",
        ),
        StructuredIssue::error(
            "tunnel_config_error",
            FieldPath::root(),
            "first",
            "tunnel.config",
        ),
    ];

    StructuredIssue::sort_stable(&mut issues);

    assert_eq!(issues[0].message, "first");
    assert_eq!(issues[1].message, "third");
    assert_eq!(issues[2].severity, IssueSeverity::Warning);
}

#[test]
fn issue_serializes_without_missing_reference() {
    let issue = StructuredIssue {
        kind: "k".to_string(),
        severity: IssueSeverity::Info,
        field_path: FieldPath::root(),
        message: "m".to_string(),
        reference: None,
    };
    let value = serde_json::to_value(&issue).expect("issue must serialize");
    assert_eq!(value["severity"], "info");
    assert!(value.get("reference").is_none());
}
