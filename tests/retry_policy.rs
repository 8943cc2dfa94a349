//! Request-level retry behavior, driven through the public client with a
//! scripted transport and a paused clock.

mod common;

use common::{client_with, Reply, ScriptedTransport};
use neuredge_sdk::transport::Method;
use neuredge_sdk::ErrorCode;
use serde_json::json;
use std::time::Duration;
use tokio::time::Instant;

const INDEXES: &str = "/v1/indexes";

#[tokio::test(start_paused = true)]
async fn test_authentication_error_is_never_retried() {
    let transport = ScriptedTransport::new();
    transport.on(
        Method::Get,
        INDEXES,
        vec![Reply::json(401, json!({"error": {"message": "bad key"}}))],
    );
    let client = client_with(transport.clone(), 3, 1.0);

    let err = client.get(INDEXES).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::AuthenticationError);
    assert_eq!(err.status_code, 401);
    assert_eq!(err.message, "Invalid API key");
    assert_eq!(transport.count(Method::Get, INDEXES), 1);
}

#[tokio::test(start_paused = true)]
async fn test_authentication_error_regardless_of_body() {
    let transport = ScriptedTransport::new();
    transport.on(Method::Get, INDEXES, vec![Reply::raw(401, b"<html>nope</html>")]);
    let client = client_with(transport.clone(), 3, 1.0);

    let err = client.get(INDEXES).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::AuthenticationError);
    assert_eq!(transport.count(Method::Get, INDEXES), 1);
}

#[tokio::test(start_paused = true)]
async fn test_quota_exceeded_is_never_retried() {
    let transport = ScriptedTransport::new();
    transport.on(
        Method::Post,
        "/summarize",
        vec![Reply::json(
            429,
            json!({"error": {"type": "quota_exceeded", "message": "Monthly quota used"}}),
        )],
    );
    let client = client_with(transport.clone(), 3, 1.0);

    let err = client.text().summarize("long text").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::QuotaExceeded);
    assert_eq!(err.status_code, 429);
    assert_eq!(err.message, "Monthly quota used");
    assert_eq!(err.details.as_ref().unwrap()["type"], "quota_exceeded");
    assert_eq!(transport.count(Method::Post, "/summarize"), 1);
}

#[tokio::test(start_paused = true)]
async fn test_quota_exceeded_in_success_envelope() {
    let transport = ScriptedTransport::new();
    transport.on(
        Method::Post,
        "/sentiment",
        vec![Reply::ok(json!({
            "success": false,
            "error": {"code": "QUOTA_EXCEEDED", "message": "limit reached"}
        }))],
    );
    let client = client_with(transport.clone(), 3, 1.0);

    let err = client.text().analyze_sentiment("great").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::QuotaExceeded);
    assert_eq!(transport.count(Method::Post, "/sentiment"), 1);
}

#[tokio::test(start_paused = true)]
async fn test_network_failures_back_off_exponentially() {
    let transport = ScriptedTransport::new();
    transport.on(Method::Get, INDEXES, vec![Reply::Network("connection refused")]);
    let client = client_with(transport.clone(), 3, 1.0);

    let start = Instant::now();
    let err = client.get(INDEXES).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::NetworkError);
    assert_eq!(err.status_code, 0);

    let calls = transport.calls_to(Method::Get, INDEXES);
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[1].at - calls[0].at, Duration::from_secs(1));
    assert_eq!(calls[2].at - calls[1].at, Duration::from_secs(2));
    // No sleep after the final attempt.
    assert_eq!(start.elapsed(), Duration::from_secs(3));
}

#[tokio::test(start_paused = true)]
async fn test_recovers_after_transient_failures() {
    let transport = ScriptedTransport::new();
    transport.on(
        Method::Post,
        "/summarize",
        vec![
            Reply::Network("reset by peer"),
            Reply::raw(503, b"Service Unavailable"),
            Reply::ok(json!({"result": {"summary": "Short."}})),
        ],
    );
    let client = client_with(transport.clone(), 3, 0.5);

    let summary = client.text().summarize("long text").await.unwrap();
    assert_eq!(summary, "Short.");

    let calls = transport.calls_to(Method::Post, "/summarize");
    assert_eq!(calls.len(), 3);
    assert!(calls.iter().all(|c| c.request_id == calls[0].request_id));
    assert!(calls.iter().all(|c| c.body == Some(json!({"text": "long text"}))));
}

#[tokio::test(start_paused = true)]
async fn test_each_logical_call_gets_its_own_request_id() {
    let transport = ScriptedTransport::new();
    transport.on(Method::Get, INDEXES, vec![Reply::ok(json!({"indexes": []}))]);
    let client = client_with(transport.clone(), 3, 1.0);

    client.get(INDEXES).await.unwrap();
    client.get(INDEXES).await.unwrap();
    let calls = transport.calls();
    assert_ne!(calls[0].request_id, calls[1].request_id);
}

#[tokio::test(start_paused = true)]
async fn test_last_error_is_surfaced_unmodified() {
    let transport = ScriptedTransport::new();
    transport.on(
        Method::Post,
        INDEXES,
        vec![
            Reply::Network("timeout"),
            Reply::json(409, json!({"error": {"type": "index_exists", "message": "Index docs exists"}})),
        ],
    );
    let client = client_with(transport.clone(), 2, 1.0);

    let err = client
        .post(INDEXES, json!({"name": "docs", "dimension": 3}))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::IndexExists);
    assert_eq!(err.status_code, 409);
    assert_eq!(err.message, "Index docs exists");
}

#[tokio::test(start_paused = true)]
async fn test_not_found_is_retried_like_other_errors() {
    let transport = ScriptedTransport::new();
    transport.on(
        Method::Get,
        "/v1/missing",
        vec![Reply::json(404, json!({"error": {"type": "not_found", "message": "nope"}}))],
    );
    let client = client_with(transport.clone(), 3, 1.0);

    let err = client.get("/v1/missing").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::Other("NOT_FOUND".into()));
    assert_eq!(transport.count(Method::Get, "/v1/missing"), 3);
}

#[tokio::test(start_paused = true)]
async fn test_zero_max_retries_still_attempts_once() {
    let transport = ScriptedTransport::new();
    transport.on(Method::Get, INDEXES, vec![Reply::Network("refused")]);
    let client = client_with(transport.clone(), 0, 1.0);

    let start = Instant::now();
    client.get(INDEXES).await.unwrap_err();
    assert_eq!(transport.count(Method::Get, INDEXES), 1);
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test]
async fn test_closed_client_fails_fast() {
    let transport = ScriptedTransport::new();
    transport.on(Method::Get, INDEXES, vec![Reply::ok(json!({"indexes": []}))]);
    let client = client_with(transport.clone(), 3, 1.0);

    client.close();
    assert!(client.is_closed());
    let err = client.vector().list_indexes().await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ClientClosed);
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn test_invalid_success_body_is_invalid_response() {
    let transport = ScriptedTransport::new();
    transport.on(Method::Get, INDEXES, vec![Reply::raw(200, b"not json")]);
    let client = client_with(transport.clone(), 2, 0.0);

    let err = client.get(INDEXES).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidResponse);
    assert_eq!(transport.count(Method::Get, INDEXES), 2);
}
