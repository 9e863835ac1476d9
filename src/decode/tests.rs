//! Tests for decoder module

use super::*;
use crate::error::Error;
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_parse_valid_json() {
    let value = JsonDecoder::new().parse(r#"{"total": 3}"#).unwrap();
    assert_eq!(value["total"], 3);
}

#[test]
fn test_parse_invalid_json_quotes_body() {
    let err = JsonDecoder::new()
        .parse("<html>Bad Gateway</html>")
        .unwrap_err();
    match err {
        Error::Decode { message } => assert!(message.contains("Bad Gateway")),
        other => panic!("Expected Decode, got {other:?}"),
    }
}

// ============================================================================
// Error Channel Tests
// ============================================================================

#[test]
fn test_error_channel_messages() {
    let payload = json!({"errorMessages": ["Issue Does Not Exist"], "errors": {}});
    let channel = JsonDecoder::new().error_channel(&payload).unwrap();
    assert_eq!(channel.error_messages, vec!["Issue Does Not Exist"]);
    assert!(channel.errors.is_empty());
}

#[test]
fn test_error_channel_field_errors_become_objects() {
    let payload = json!({
        "errorMessages": [],
        "errors": {"groupname": "Group does not exist", "startAt": "must be >= 0"}
    });
    let channel = JsonDecoder::new().error_channel(&payload).unwrap();
    assert!(channel.error_messages.is_empty());
    assert_eq!(
        channel.errors,
        vec![
            json!({"groupname": "Group does not exist"}),
            json!({"startAt": "must be >= 0"}),
        ]
    );
}

#[test]
fn test_error_channel_singular_message() {
    let payload = json!({"errorMessage": "Screen not found"});
    let channel = JsonDecoder::new().error_channel(&payload).unwrap();
    assert_eq!(channel.error_messages, vec!["Screen not found"]);
}

#[test]
fn test_error_channel_absent_for_data() {
    let decoder = JsonDecoder::new();
    assert!(decoder
        .error_channel(&json!({"total": 1, "values": []}))
        .is_none());
    assert!(decoder
        .error_channel(&json!({"errorMessages": [], "errors": {}}))
        .is_none());
    assert!(decoder.error_channel(&json!([{"id": "1"}])).is_none());
}

// ============================================================================
// Item Selection Tests
// ============================================================================

#[test]
fn test_select_named_field() {
    let payload = json!({"groups": [{"name": "engineering"}, {"name": "engine-ops"}]});
    let items = JsonDecoder::new()
        .select_items(&payload, &ItemSelector::Field("groups"))
        .unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[1]["name"], "engine-ops");
}

#[test]
fn test_select_missing_field() {
    let err = JsonDecoder::new()
        .select_items(&json!({"total": 0}), &ItemSelector::values())
        .unwrap_err();
    assert!(matches!(err, Error::MissingPageField { ref field } if field == "values"));
}

#[test]
fn test_select_field_of_wrong_type() {
    let err = JsonDecoder::new()
        .select_items(&json!({"values": "nope"}), &ItemSelector::values())
        .unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
}

#[test]
fn test_select_top_level_array() {
    let decoder = JsonDecoder::new();
    let items = decoder
        .select_items(&json!([{"id": 1}, {"id": 2}]), &ItemSelector::TopLevelArray)
        .unwrap();
    assert_eq!(items, vec![json!({"id": 1}), json!({"id": 2})]);

    assert!(decoder
        .select_items(&json!({"id": 1}), &ItemSelector::TopLevelArray)
        .is_err());
}

#[test]
fn test_select_whole_payload() {
    let payload = json!({"key": "ABC-1", "fields": {}});
    let items = JsonDecoder::new()
        .select_items(&payload, &ItemSelector::WholePayload)
        .unwrap();
    assert_eq!(items, vec![payload]);
}
