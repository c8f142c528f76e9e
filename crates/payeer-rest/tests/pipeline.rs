//! End-to-end tests of the request pipeline over a mock transport
//!
//! Covers verb selection, signing, envelope unwrapping, and the error
//! taxonomy without touching the network.

mod common;

use common::MockTransport;
use hmac::{Hmac, Mac};
use payeer_rest::{
    Credentials, HttpMethod, OrderAction, OrderFilter, OrderRequest, Params, PayeerClient,
    RestError,
};
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use sha2::Sha256;
use std::sync::Arc;

const SUCCESS: &str = r#"{"success":true}"#;
const TEST_SECRET: &str = "test-secret";

fn public_client(mock: &Arc<MockTransport>) -> PayeerClient {
    PayeerClient::with_transport(mock.clone(), None)
}

fn auth_client(mock: &Arc<MockTransport>) -> PayeerClient {
    let creds = Credentials::new("test-id", TEST_SECRET).unwrap();
    PayeerClient::with_transport(mock.clone(), Some(creds))
}

/// Recompute the signature the same way the server would: over the method
/// name and the exact body bytes received.
fn expected_signature(method: &str, body: &str) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(TEST_SECRET.as_bytes()).unwrap();
    mac.update(method.as_bytes());
    mac.update(body.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

fn body_ts(request_body: &str) -> u64 {
    let parsed: Value = serde_json::from_str(request_body).unwrap();
    parsed["ts"].as_u64().expect("ts must be an integer")
}

// =============================================================================
// Verb selection and headers
// =============================================================================

#[tokio::test]
async fn unauthenticated_empty_params_uses_get_without_body() {
    let mock = MockTransport::new();
    mock.respond(SUCCESS);
    let client = public_client(&mock);

    client.call("info", Params::new()).await.unwrap();

    let request = mock.last_request();
    assert_eq!(request.method, HttpMethod::Get);
    assert_eq!(request.url, "https://payeer.com/api/trade/info");
    assert!(request.body.is_none());
    assert_eq!(request.header("Content-Type"), Some("application/json"));
    assert_eq!(request.header("API-ID"), None);
    assert_eq!(request.header("API-SIGN"), None);
}

#[tokio::test]
async fn unauthenticated_params_use_post_without_signature() {
    let mock = MockTransport::new();
    mock.respond(r#"{"success":true,"pairs":{}}"#);
    let client = public_client(&mock);

    client.get_ticker("BTC_USDT").await.unwrap();

    let request = mock.last_request();
    assert_eq!(request.method, HttpMethod::Post);
    assert_eq!(request.url, "https://payeer.com/api/trade/ticker");
    assert_eq!(request.header("API-SIGN"), None);

    let body: Value = serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
    assert_eq!(body["pair"], "BTC_USDT");
    assert!(body.get("ts").is_none());
}

#[tokio::test]
async fn credentials_force_post_even_without_params() {
    let mock = MockTransport::new();
    mock.respond(SUCCESS);
    let client = auth_client(&mock);

    client.call("info", Params::new()).await.unwrap();

    let request = mock.last_request();
    assert_eq!(request.method, HttpMethod::Post);
    assert!(request.body.is_some());
}

// =============================================================================
// Signing
// =============================================================================

#[tokio::test]
async fn signature_covers_the_transmitted_body() {
    let mock = MockTransport::new();
    mock.respond(r#"{"success":true,"balances":{}}"#);
    let client = auth_client(&mock);

    client.get_account().await.unwrap();

    let request = mock.last_request();
    assert_eq!(request.method, HttpMethod::Post);
    assert_eq!(request.header("API-ID"), Some("test-id"));

    let body = request.body.as_deref().unwrap();
    assert_eq!(
        request.header("API-SIGN"),
        Some(expected_signature("account", body).as_str())
    );
    // ts is a millisecond Unix timestamp injected before signing
    assert!(body_ts(body) > 1_672_531_200_000);
}

#[tokio::test]
async fn order_create_signs_typed_params() {
    let mock = MockTransport::new();
    mock.respond(r#"{"success":true,"order_id":12345}"#);
    let client = auth_client(&mock);

    let order = OrderRequest::limit("BTC_USDT", OrderAction::Buy, dec!(0.001), dec!(65000));
    let envelope = client.create_order(&order).await.unwrap();
    assert_eq!(envelope["order_id"], json!(12345));

    let request = mock.last_request();
    let body = request.body.as_deref().unwrap();
    assert_eq!(
        request.header("API-SIGN"),
        Some(expected_signature("order_create", body).as_str())
    );

    let parsed: Value = serde_json::from_str(body).unwrap();
    assert_eq!(parsed["pair"], "BTC_USDT");
    assert_eq!(parsed["type"], "limit");
    assert_eq!(parsed["action"], "buy");
    assert_eq!(parsed["amount"], "0.001");
    assert_eq!(parsed["price"], "65000");
}

#[tokio::test]
async fn timestamps_are_non_decreasing_across_calls() {
    let mock = MockTransport::new();
    mock.respond(SUCCESS);
    mock.respond(SUCCESS);
    let client = auth_client(&mock);

    client.call("info", Params::new()).await.unwrap();
    client.call("info", Params::new()).await.unwrap();

    let requests = mock.requests();
    let first = body_ts(requests[0].body.as_deref().unwrap());
    let second = body_ts(requests[1].body.as_deref().unwrap());
    assert!(second >= first);
}

// =============================================================================
// Envelope unwrapping
// =============================================================================

#[tokio::test]
async fn ticker_unwraps_the_pairs_field() {
    let mock = MockTransport::new();
    let pairs = json!({"BTC_USDT": {"ask": "65001", "bid": "64999"}});
    mock.respond(&json!({"success": true, "pairs": pairs}).to_string());
    let client = public_client(&mock);

    let result = client.get_ticker("BTC_USDT").await.unwrap();
    assert_eq!(result, pairs);
}

#[tokio::test]
async fn missing_payload_field_yields_null() {
    let mock = MockTransport::new();
    mock.respond(SUCCESS);
    let client = auth_client(&mock);

    let balances = client.get_account().await.unwrap();
    assert!(balances.is_null());
}

#[tokio::test]
async fn empty_body_is_an_empty_result() {
    let mock = MockTransport::new();
    mock.respond("");
    let client = public_client(&mock);

    let envelope = client.call("info", Params::new()).await.unwrap();
    assert!(envelope.is_empty());
}

// =============================================================================
// Error taxonomy
// =============================================================================

#[tokio::test]
async fn api_error_surfaces_code_and_last_error() {
    let mock = MockTransport::new();
    mock.respond(r#"{"success":false,"error":{"code":"E1"}}"#);
    let client = auth_client(&mock);

    let err = client.get_account().await.unwrap_err();
    match err {
        RestError::Api { code, details } => {
            assert_eq!(code, "E1");
            assert_eq!(details["code"], json!("E1"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }

    let last = client.last_error();
    assert_eq!(last["code"], json!("E1"));
}

#[tokio::test]
async fn last_error_is_overwritten_per_failure() {
    let mock = MockTransport::new();
    mock.respond(r#"{"success":false,"error":{"code":"FIRST"}}"#);
    mock.respond(r#"{"success":false,"error":{"code":"SECOND"}}"#);
    let client = public_client(&mock);

    let _ = client.get_ticker("BTC_USDT").await;
    let _ = client.get_ticker("BTC_USDT").await;

    assert_eq!(client.last_error()["code"], json!("SECOND"));
}

#[tokio::test]
async fn transport_failure_is_distinct_from_api_error() {
    let mock = MockTransport::new();
    mock.fail_with_timeout();
    let client = public_client(&mock);

    let err = client.call("info", Params::new()).await.unwrap_err();
    assert!(matches!(err, RestError::Transport(_)));
    // Only API error envelopes touch the last-error slot
    assert!(client.last_error().is_empty());
}

// =============================================================================
// Endpoint surface
// =============================================================================

#[tokio::test]
async fn cancel_orders_sends_filter_and_unwraps_items() {
    let mock = MockTransport::new();
    mock.respond(r#"{"success":true,"items":[{"id":1,"success":true}]}"#);
    let client = auth_client(&mock);

    let filter = OrderFilter {
        pair: Some("BTC_USDT".to_string()),
        action: Some(OrderAction::Sell),
    };
    let items = client.cancel_orders(&filter).await.unwrap();
    assert_eq!(items[0]["id"], json!(1));

    let request = mock.last_request();
    assert_eq!(request.url, "https://payeer.com/api/trade/orders_cancel");
    let body: Value = serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
    assert_eq!(body["pair"], "BTC_USDT");
    assert_eq!(body["action"], "sell");
}

#[tokio::test]
async fn order_status_sends_order_id_and_unwraps_order() {
    let mock = MockTransport::new();
    mock.respond(r#"{"success":true,"order":{"id":987,"status":"success"}}"#);
    let client = auth_client(&mock);

    let order = client.get_order_status(987).await.unwrap();
    assert_eq!(order["status"], json!("success"));

    let request = mock.last_request();
    assert_eq!(request.url, "https://payeer.com/api/trade/order_status");
    let body: Value = serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
    assert_eq!(body["order_id"], json!(987));
}

// =============================================================================
// Codec sanity
// =============================================================================

#[tokio::test]
async fn params_round_trip_through_the_codec() {
    let mut params = Params::new();
    params.insert("pair".to_string(), json!("BTC_USDT"));
    params.insert("limit".to_string(), json!(100));
    params.insert("nested".to_string(), json!({"a": [1, 2, 3]}));

    let encoded = serde_json::to_string(&params).unwrap();
    let decoded: Params = serde_json::from_str(&encoded).unwrap();
    assert_eq!(params, decoded);
}
