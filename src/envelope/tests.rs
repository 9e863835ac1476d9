//! Tests for envelope module

use super::*;
use crate::decode::ItemSelector;
use crate::http::ScriptedInvoker;
use crate::types::Query;
use pretty_assertions::assert_eq;
use serde_json::json;

const GROUPS_URL: &str = "https://example.atlassian.net/rest/api/3/groups/picker";

// ============================================================================
// Collector Tests
// ============================================================================

#[test]
fn test_collector_serializes_stable_field_order() {
    let mut collector = Collector::items("https://x/rest/api/3/label", Query::new().with("a", 1i64));
    collector.extend_items([json!("bug"), json!("infra")]);
    collector.total_count = 2;

    let text = serde_json::to_string(&collector).unwrap();
    assert_eq!(
        text,
        concat!(
            r#"{"endpoint":"https://x/rest/api/3/label","query":{"a":1},"is_complete":false,"#,
            r#""page_capacity":null,"roundtrip_count":0,"start_index":0,"total_count":2,"#,
            r#""errors":[],"error_messages":[],"items":["bug","infra"]}"#
        )
    );
}

#[test]
fn test_collector_record_and_summary_serialization() {
    let mut collector = Collector::record("https://x/rest/api/3/serverInfo", Query::new());
    collector.summary_display = Some("Showing 0 of 0".to_string());
    collector.payload = Payload::Record(json!({"version": "1001"}).as_object().unwrap().clone());

    let value = serde_json::to_value(&collector).unwrap();
    assert_eq!(value["record"], json!({"version": "1001"}));
    assert_eq!(value["summary_display"], "Showing 0 of 0");
    assert!(value.get("items").is_none());
}

#[test]
fn test_collector_extend_ignores_record() {
    let mut collector = Collector::record("u", Query::new());
    collector.extend_items([json!(1)]);
    assert!(collector.payload.is_empty());
    assert!(collector.item_slice().is_empty());
}

// ============================================================================
// fetch_items Tests
// ============================================================================

#[tokio::test]
async fn test_fetch_items_group_picker() {
    let invoker = ScriptedInvoker::new([json!({
        "header": "Showing 2 of 2 matching groups",
        "total": 2,
        "groups": [{"name": "engineering"}, {"name": "engine-ops"}]
    })]);
    let query = Query::new().with("query", "eng").with("caseInsensitive", true);
    let request = SingleRequest::new(GROUPS_URL, query.clone())
        .selector(ItemSelector::Field("groups"))
        .summary_field("header");

    let collector = fetch_items(&invoker, &request).await.unwrap();

    assert_eq!(
        collector.summary_display.as_deref(),
        Some("Showing 2 of 2 matching groups")
    );
    assert_eq!(collector.item_slice().len(), 2);
    assert_eq!(collector.total_count, 2);
    assert_eq!(collector.roundtrip_count, 1);
    assert!(collector.is_complete);
    assert!(!collector.has_errors());
    assert_eq!(collector.query, query);
    assert_eq!(invoker.calls(), vec![(GROUPS_URL.to_string(), query)]);
}

#[tokio::test]
async fn test_fetch_items_total_and_fixed_capacity() {
    let invoker = ScriptedInvoker::new([json!({
        "offset": 0, "limit": 1000, "total": 4120,
        "records": [{"id": 1}, {"id": 2}]
    })]);
    let request = SingleRequest::new("u", Query::new())
        .selector(ItemSelector::Field("records"))
        .total_field("total")
        .capacity(CapacitySource::Fixed(1000));

    let collector = fetch_items(&invoker, &request).await.unwrap();
    assert_eq!(collector.total_count, 4120);
    assert_eq!(collector.page_capacity, Some(1000));
    assert_eq!(collector.item_slice().len(), 2);
}

#[tokio::test]
async fn test_fetch_items_capacity_from_field() {
    let invoker = ScriptedInvoker::new([json!({
        "startAt": 0, "maxResults": 5000, "total": 1,
        "worklogs": [{"id": "100"}]
    })]);
    let request = SingleRequest::new("u", Query::new())
        .selector(ItemSelector::Field("worklogs"))
        .capacity(CapacitySource::Field("maxResults"));

    let collector = fetch_items(&invoker, &request).await.unwrap();
    assert_eq!(collector.page_capacity, Some(5000));
    assert_eq!(collector.total_count, 1);
}

#[tokio::test]
async fn test_fetch_items_whole_payload() {
    let issue = json!({"id": "10001", "key": "ABC-1", "fields": {}});
    let invoker = ScriptedInvoker::new([issue.clone()]);
    let request = SingleRequest::new("u", Query::new());

    let collector = fetch_items(&invoker, &request).await.unwrap();
    assert_eq!(collector.item_slice(), &[issue][..]);
    assert_eq!(collector.total_count, 1);
}

#[tokio::test]
async fn test_fetch_items_error_envelope() {
    let invoker =
        ScriptedInvoker::new([r#"{"errorMessages":["Issue Does Not Exist"],"errors":{}}"#]);
    let request = SingleRequest::new("u", Query::new());

    let collector = fetch_items(&invoker, &request).await.unwrap();
    assert_eq!(collector.error_messages, vec!["Issue Does Not Exist"]);
    assert!(collector.errors.is_empty());
    assert!(collector.item_slice().is_empty());
    assert_eq!(collector.total_count, 0);
    assert_eq!(collector.roundtrip_count, 1);
}

#[tokio::test]
async fn test_fetch_items_unparseable_body() {
    let invoker = ScriptedInvoker::new(["<html>oops</html>"]);
    let err = fetch_items(&invoker, &SingleRequest::new("u", Query::new()))
        .await
        .unwrap_err();
    assert!(matches!(err, crate::Error::Decode { .. }));
}

// ============================================================================
// fetch_record Tests
// ============================================================================

#[tokio::test]
async fn test_fetch_record() {
    let invoker = ScriptedInvoker::new([json!({
        "baseUrl": "https://example.atlassian.net",
        "version": "1001.0.0",
        "deploymentType": "Cloud"
    })]);
    let collector = fetch_record(&invoker, &SingleRequest::new("u", Query::new()))
        .await
        .unwrap();

    assert_eq!(collector.total_count, 3);
    assert_eq!(collector.roundtrip_count, 1);
    assert!(collector.is_complete);
    match &collector.payload {
        Payload::Record(record) => assert_eq!(record["deploymentType"], "Cloud"),
        Payload::Items(_) => panic!("Expected record payload"),
    }
}

#[tokio::test]
async fn test_fetch_record_error_envelope_leaves_record_empty() {
    let invoker = ScriptedInvoker::new([json!({
        "errorMessages": ["No project could be found with key 'NOPE'."],
        "errors": {}
    })]);
    let collector = fetch_record(&invoker, &SingleRequest::new("u", Query::new()))
        .await
        .unwrap();

    assert_eq!(collector.error_messages.len(), 1);
    assert!(collector.payload.is_empty());
    assert_eq!(collector.total_count, 0);
}

#[tokio::test]
async fn test_fetch_record_rejects_array() {
    let invoker = ScriptedInvoker::new(["[1, 2]"]);
    let err = fetch_record(&invoker, &SingleRequest::new("u", Query::new()))
        .await
        .unwrap_err();
    assert!(matches!(err, crate::Error::Decode { .. }));
}
