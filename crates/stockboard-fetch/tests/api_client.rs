//! Integration tests for `ApiClient` against a local `wiremock` server.
//!
//! Covers shape handling in both decode modes, the malformed-payload retry
//! loop, and the statuses that must abort without retrying.

use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use stockboard_core::DecodeMode;
use stockboard_fetch::{ApiClient, ClientOptions, FetchError, RetryPolicy};

/// Builds a client against `server` with immediate retries.
fn test_client(server: &MockServer, decode_mode: DecodeMode, max_retries: u32) -> ApiClient {
    let options = ClientOptions {
        timeout_secs: 5,
        user_agent: "stockboard-test/0.1".to_owned(),
        force_error_mode: "none".to_owned(),
        decode_mode,
        retry: RetryPolicy {
            max_retries,
            backoff_base_ms: 0,
        },
    };
    ApiClient::new(&server.uri(), options).expect("failed to build test ApiClient")
}

fn jackets_json() -> serde_json::Value {
    json!([
        {"id": "f33561de3a864f951a", "type": "jackets", "name": "EWHHOP ROOM",
         "color": ["blue"], "price": 52, "manufacturer": "reps"},
        {"id": "0e4772c827c4296592fbd", "type": "jackets", "name": "DALEN WATER",
         "color": ["black", "white"], "price": 61, "manufacturer": "abiplos"}
    ])
}

fn reps_availability_json() -> serde_json::Value {
    json!({
        "code": 200,
        "response": [
            {"id": "F33561DE3A864F951A",
             "DATAPAYLOAD": "<AVAILABILITY>\n  <CODE>200</CODE>\n  <INSTOCKVALUE>INSTOCK</INSTOCKVALUE>\n</AVAILABILITY>"}
        ]
    })
}

// ---------------------------------------------------------------------------
// Happy paths
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_products_returns_records_in_api_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products/jackets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(jackets_json()))
        .mount(&server)
        .await;

    let client = test_client(&server, DecodeMode::Lenient, 0);
    let products = client.fetch_products("jackets").await.expect("products");

    assert_eq!(products.len(), 2);
    assert_eq!(products[0].id, "f33561de3a864f951a");
    assert_eq!(products[1].id, "0e4772c827c4296592fbd");
    assert!(products.iter().all(|p| p.availability.is_empty()));
}

#[tokio::test]
async fn every_request_carries_force_error_mode_header() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products/shirts"))
        .and(header("x-force-error-mode", "none"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server, DecodeMode::Lenient, 0);
    let products = client.fetch_products("shirts").await.expect("products");
    assert!(products.is_empty());
}

#[tokio::test]
async fn fetch_availability_unwraps_envelope_in_both_modes() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/availability/reps"))
        .respond_with(ResponseTemplate::new(200).set_body_json(reps_availability_json()))
        .mount(&server)
        .await;

    for mode in [DecodeMode::Lenient, DecodeMode::Strict] {
        let client = test_client(&server, mode, 0);
        let records = client.fetch_availability("reps").await.expect("availability");
        assert_eq!(records.len(), 1, "mode {mode}");
        assert_eq!(records[0].id, "F33561DE3A864F951A");
        assert!(records[0].availability.is_none());
    }
}

#[tokio::test]
async fn lenient_availability_accepts_bare_array() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/availability/reps"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "A1", "DATAPAYLOAD": "<INSTOCKVALUE>LESSTHAN10</INSTOCKVALUE>"}
        ])))
        .mount(&server)
        .await;

    let client = test_client(&server, DecodeMode::Lenient, 0);
    let records = client.fetch_availability("reps").await.expect("availability");
    assert_eq!(records.len(), 1);
}

// ---------------------------------------------------------------------------
// Malformed payload retry
// ---------------------------------------------------------------------------

#[tokio::test]
async fn empty_body_is_retried_until_well_formed() {
    let server = MockServer::start().await;

    // First three answers are 200 with no body at all.
    Mock::given(method("GET"))
        .and(path("/products/jackets"))
        .respond_with(ResponseTemplate::new(200))
        .up_to_n_times(3)
        .with_priority(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/products/jackets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(jackets_json()))
        .mount(&server)
        .await;

    let client = test_client(&server, DecodeMode::Lenient, 10);
    let products = client.fetch_products("jackets").await.expect("products");
    assert_eq!(products.len(), 2);

    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 4, "3 malformed + 1 well-formed");
}

#[tokio::test]
async fn stringified_response_field_is_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/availability/reps"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"code": 200, "response": "[]"})),
        )
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/availability/reps"))
        .respond_with(ResponseTemplate::new(200).set_body_json(reps_availability_json()))
        .mount(&server)
        .await;

    let client = test_client(&server, DecodeMode::Strict, 3);
    let records = client.fetch_availability("reps").await.expect("availability");
    assert_eq!(records.len(), 1);

    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 2);
}

#[tokio::test]
async fn malformed_payload_is_fatal_once_retries_run_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products/jackets"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .expect(3)
        .mount(&server)
        .await;

    let client = test_client(&server, DecodeMode::Lenient, 2);
    let result = client.fetch_products("jackets").await;

    assert!(
        matches!(result, Err(FetchError::MalformedPayload { .. })),
        "expected MalformedPayload, got: {result:?}"
    );
}

#[tokio::test]
async fn strict_mode_retries_bare_availability_array() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/availability/reps"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(2)
        .mount(&server)
        .await;

    let client = test_client(&server, DecodeMode::Strict, 1);
    let result = client.fetch_availability("reps").await;
    assert!(
        matches!(result, Err(FetchError::MalformedPayload { .. })),
        "expected MalformedPayload, got: {result:?}"
    );
}

// ---------------------------------------------------------------------------
// Fatal statuses
// ---------------------------------------------------------------------------

#[tokio::test]
async fn strict_mode_retries_product_without_color() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products/shirts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "a1", "type": "shirts", "name": "NO COLOR", "price": 12, "manufacturer": "reps"}
        ])))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products/shirts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(jackets_json()))
        .mount(&server)
        .await;

    let client = test_client(&server, DecodeMode::Strict, 3);
    let products = client.fetch_products("shirts").await.expect("products");

    assert_eq!(products.len(), 2);
    assert_eq!(products[1].color, vec!["black".to_owned(), "white".to_owned()]);
    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 2);
}

#[tokio::test]
async fn server_error_is_fatal_and_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products/accessories"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server, DecodeMode::Lenient, 5);
    let result = client.fetch_products("accessories").await;

    assert!(
        matches!(result, Err(FetchError::UnexpectedStatus { status: 500, .. })),
        "expected UnexpectedStatus(500), got: {result:?}"
    );
}

#[tokio::test]
async fn non_200_success_status_is_still_fatal() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products/jackets"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server, DecodeMode::Lenient, 5);
    let result = client.fetch_products("jackets").await;

    assert!(
        matches!(result, Err(FetchError::UnexpectedStatus { status: 204, .. })),
        "expected UnexpectedStatus(204), got: {result:?}"
    );
}
