//! Behavior-driven tests for card-listing pagination
//!
//! These tests verify HOW the paginator walks the cursor protocol and when it
//! stops, counting transport calls to prove the number of dispatches.

use std::sync::Arc;

use serde_json::{json, Value};
use wbseller_core::{
    AggregatedResult, ApiErrorKind, CardListing, PageMode, ScriptedHttpClient, CARDS_LIST_ENDPOINT,
};
use wbseller_tests::authorized_api;

fn items(start: u64, count: u64) -> Vec<Value> {
    (start..start + count).map(|nm_id| json!({ "nmID": nm_id })).collect()
}

fn page(data: Vec<Value>, cursor: Option<(&str, u64)>) -> String {
    let total = data.len();
    let cursor = match cursor {
        Some((updated_at, nm_id)) => json!({ "updatedAt": updated_at, "nmID": nm_id }),
        None => json!({}),
    };
    json!({ "data": data, "cursor": cursor, "total": total }).to_string()
}

fn aggregated(listing: CardListing) -> AggregatedResult {
    match listing {
        CardListing::Aggregated(result) => result,
        CardListing::Page(value) => panic!("expected aggregated result, got page {value}"),
    }
}

#[test]
fn when_three_pages_exist_all_items_are_merged() {
    // Given: Two full pages with continuation cursors and a short final page
    let client = Arc::new(
        ScriptedHttpClient::new()
            .with_json(200, page(items(0, 100), Some(("2024-01-01T00:00:00Z", 99))))
            .with_json(200, page(items(100, 100), Some(("2024-01-02T00:00:00Z", 199))))
            .with_json(200, page(items(200, 40), None)),
    );

    // When: All pages are requested
    let listing = authorized_api(&client).cards(json!({}), PageMode::AllPages).expect("success");
    let result = aggregated(listing);

    // Then: 240 items, total 240, no error, and exactly 3 dispatches
    assert_eq!(result.data.len(), 240);
    assert_eq!(result.total, 240);
    assert!(!result.error);
    assert_eq!(result.error_text, "");
    assert_eq!(result.additional_errors, None);
    assert_eq!(result.data[239], json!({"nmID": 239}));
    assert_eq!(client.request_count(), 3);
}

#[test]
fn when_paging_the_previous_cursor_is_sent_on_the_next_request() {
    let client = Arc::new(
        ScriptedHttpClient::new()
            .with_json(200, page(items(0, 100), Some(("t1", 99))))
            .with_json(200, page(items(100, 100), Some(("t2", 199))))
            .with_json(200, page(items(200, 40), None)),
    );

    authorized_api(&client)
        .cards(json!({"filter": {"textSearch": "dress"}}), PageMode::AllPages)
        .expect("success");

    let bodies = client
        .requests()
        .into_iter()
        .map(|request| {
            assert!(request.url.ends_with(CARDS_LIST_ENDPOINT));
            assert!(request.url.starts_with("https://content-api.wildberries.ru"));
            serde_json::from_str::<Value>(request.body.as_deref().unwrap_or("null"))
                .expect("json body")
        })
        .collect::<Vec<_>>();

    assert_eq!(
        bodies[0],
        json!({"settings": {
            "cursor": {"limit": 100},
            "filter": {"withPhoto": -1, "textSearch": "dress"},
        }})
    );
    assert_eq!(
        bodies[1]["settings"]["cursor"],
        json!({"limit": 100, "updatedAt": "t1", "nmID": 99})
    );
    assert_eq!(
        bodies[2]["settings"]["cursor"],
        json!({"limit": 100, "updatedAt": "t2", "nmID": 199})
    );
}

#[test]
fn when_first_page_is_short_only_one_call_is_made() {
    // Given: A first page already below the limit, without cursor fields
    let client = Arc::new(ScriptedHttpClient::new().with_json(200, page(items(0, 7), None)));

    // When: All pages are requested
    let listing = authorized_api(&client).cards(json!({}), PageMode::AllPages).expect("success");
    let result = aggregated(listing);

    // Then: The single page is wrapped in the aggregated shape
    assert_eq!(client.request_count(), 1);
    assert_eq!(result.data, items(0, 7));
    assert_eq!(result.total, 7);
    assert!(!result.error);
}

#[test]
fn when_short_page_still_has_cursor_loop_stops_on_total() {
    let client = Arc::new(
        ScriptedHttpClient::new()
            .with_json(200, page(items(0, 10), Some(("t1", 9))))
            .with_json(200, page(items(10, 5), Some(("t2", 14)))),
    );

    let result = aggregated(
        authorized_api(&client)
            .cards(json!({"cursor": {"limit": 10}}), PageMode::AllPages)
            .expect("success"),
    );

    assert_eq!(client.request_count(), 2);
    assert_eq!(result.total, 15);
}

#[test]
fn when_first_page_is_empty_result_is_empty_with_zero_total() {
    let client = Arc::new(ScriptedHttpClient::new().with_json(200, r#"{"data":[],"total":0}"#));

    let listing = authorized_api(&client).cards(json!({}), PageMode::AllPages).expect("success");
    let result = aggregated(listing);

    assert!(result.data.is_empty());
    assert_eq!(result.total, 0);
    assert_eq!(client.request_count(), 1);
}

#[test]
fn when_single_page_mode_is_selected_raw_response_is_returned() {
    let raw = page(items(0, 100), Some(("t1", 99)));
    let client = Arc::new(ScriptedHttpClient::new().with_json(200, raw.clone()));

    let listing = authorized_api(&client).cards(json!({}), PageMode::SinglePage).expect("success");

    assert_eq!(
        listing,
        CardListing::Page(serde_json::from_str(&raw).expect("valid json"))
    );
    assert_eq!(client.request_count(), 1);
}

#[test]
fn when_a_middle_page_fails_the_error_surfaces_and_no_partial_result_is_returned() {
    let client = Arc::new(
        ScriptedHttpClient::new()
            .with_json(200, page(items(0, 100), Some(("t1", 99))))
            .with_json(429, r#"{"message":"slow down"}"#)
            .with_json(200, page(items(100, 5), None)),
    );

    let error = authorized_api(&client)
        .cards(json!({}), PageMode::AllPages)
        .expect_err("rate limit aborts the walk");

    assert_eq!(error.kind(), ApiErrorKind::RateLimit);
    assert_eq!(error.message(), "slow down");
    assert_eq!(client.request_count(), 2);
}

#[test]
fn when_walking_all_pages_with_non_positive_limit_no_request_is_sent() {
    let client = Arc::new(ScriptedHttpClient::new().with_json(200, "{}"));

    let error = authorized_api(&client)
        .cards(json!({"cursor": {"limit": 0}}), PageMode::AllPages)
        .expect_err("zero limit");

    assert_eq!(error.kind(), ApiErrorKind::Generic);
    assert_eq!(error.status(), 0);
    assert_eq!(client.request_count(), 0);
}

#[test]
fn when_single_page_mode_gets_unusual_limit_payload_is_sent_untouched() {
    // Given: Settings whose limit the paging loop could not work with
    let raw = r#"{"data":[],"total":0}"#;
    let client = Arc::new(ScriptedHttpClient::new().with_json(200, raw));

    // When: Only the first page is requested
    let listing = authorized_api(&client)
        .cards(json!({"cursor": {"limit": 0}}), PageMode::SinglePage)
        .expect("single page does not validate the limit");

    // Then: The server sees the limit as given and its answer comes back raw
    assert_eq!(listing, CardListing::Page(json!({"data": [], "total": 0})));
    assert_eq!(client.request_count(), 1);
    let body = client.requests()[0].body.clone().expect("json body");
    let sent: Value = serde_json::from_str(&body).expect("valid json");
    assert_eq!(sent["settings"]["cursor"]["limit"], json!(0));
    assert_eq!(sent["settings"]["filter"]["withPhoto"], json!(-1));
}

#[test]
fn when_aggregated_result_is_flattened_it_matches_single_page_shape() {
    let client = Arc::new(ScriptedHttpClient::new().with_json(200, page(items(0, 2), None)));

    let value = authorized_api(&client)
        .cards(json!({}), PageMode::AllPages)
        .expect("success")
        .into_value();

    assert_eq!(value["data"], json!([{"nmID": 0}, {"nmID": 1}]));
    assert_eq!(value["total"], json!(2));
    assert_eq!(value["error"], json!(false));
    assert_eq!(value["errorText"], json!(""));
    assert_eq!(value["additionalErrors"], Value::Null);
}
