//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::time::Duration;
use tower::ServiceExt;
use ttl_overlay::{api::create_router, AppState, CacheConfig};

// == Helper Functions ==

fn create_test_app() -> Router {
    create_router(AppState::from_config(&CacheConfig::default()).unwrap())
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

// == SET Endpoint Tests ==

#[tokio::test]
async fn test_set_endpoint_success() {
    let app = create_test_app();

    let (status, json) = send(
        &app,
        "PUT",
        "/set",
        Some(r#"{"key":"test_key","value":"test_value"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["message"].as_str().unwrap().contains("test_key"));
}

#[tokio::test]
async fn test_set_endpoint_empty_key() {
    let app = create_test_app();

    let (status, json) = send(&app, "PUT", "/set", Some(r#"{"key":"","value":1}"#)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("empty"));
}

#[tokio::test]
async fn test_set_structured_value_roundtrip() {
    let app = create_test_app();
    let value = json!({"user": {"id": 42, "roles": ["admin"]}, "active": true});
    let body = json!({"key": "profile", "value": value, "ttl": null}).to_string();

    let (status, _) = send(&app, "PUT", "/set", Some(&body)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = send(&app, "GET", "/get/profile", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["key"], "profile");
    assert_eq!(json["value"], value);
}

#[tokio::test]
async fn test_set_zero_ttl_is_noop() {
    let app = create_test_app();

    let (status, _) = send(
        &app,
        "PUT",
        "/set",
        Some(r#"{"key":"foo","value":"bar","ttl":0}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, json) = send(&app, "GET", "/has/foo", None).await;
    assert_eq!(json["exists"], false);

    let (status, _) = send(&app, "GET", "/get/foo", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// == GET / HAS Endpoint Tests ==

#[tokio::test]
async fn test_get_endpoint_not_found() {
    let app = create_test_app();

    let (status, json) = send(&app, "GET", "/get/nonexistent_key", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("nonexistent_key"));
}

#[tokio::test]
async fn test_has_endpoint() {
    let app = create_test_app();

    let (_, json) = send(&app, "GET", "/has/foo", None).await;
    assert_eq!(json, json!({"key": "foo", "exists": false}));

    send(&app, "PUT", "/set", Some(r#"{"key":"foo","value":"bar"}"#)).await;

    let (_, json) = send(&app, "GET", "/has/foo", None).await;
    assert_eq!(json, json!({"key": "foo", "exists": true}));
}

#[tokio::test]
async fn test_ttl_expiration_via_api() {
    let app = create_test_app();

    send(
        &app,
        "PUT",
        "/set",
        Some(r#"{"key":"foo","value":"bar","ttl":1}"#),
    )
    .await;

    let (status, json) = send(&app, "GET", "/get/foo", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["value"], "bar");

    tokio::time::sleep(Duration::from_secs(2)).await;

    let (status, _) = send(&app, "GET", "/get/foo", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, json) = send(&app, "GET", "/has/foo", None).await;
    assert_eq!(json["exists"], false);
}

// == EXPIRE Endpoint Tests ==

#[tokio::test]
async fn test_expire_endpoint() {
    let app = create_test_app();

    send(
        &app,
        "PUT",
        "/set",
        Some(r#"{"key":"delete_key","value":"delete_value"}"#),
    )
    .await;

    let (status, json) = send(&app, "DELETE", "/expire/delete_key", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["key"], "delete_key");

    let (status, _) = send(&app, "GET", "/get/delete_key", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Expiring again still succeeds
    let (status, _) = send(&app, "DELETE", "/expire/delete_key", None).await;
    assert_eq!(status, StatusCode::OK);
}

// == STATS / HEALTH Endpoint Tests ==

#[tokio::test]
async fn test_stats_endpoint() {
    let app = create_test_app();

    send(
        &app,
        "PUT",
        "/set",
        Some(r#"{"key":"stats_key","value":"stats_value"}"#),
    )
    .await;
    send(&app, "GET", "/get/stats_key", None).await;
    send(&app, "GET", "/get/nonexistent", None).await;

    let (status, json) = send(&app, "GET", "/stats", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["hits"], 1);
    assert_eq!(json["misses"], 1);
    assert_eq!(json["hit_rate"], 0.5);
    assert_eq!(json["sweep_passes"], 0);
    assert_eq!(json["evictions"], 0);
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();

    let (status, json) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert!(json.get("timestamp").is_some());
}

// == Closed Cache ==

#[tokio::test]
async fn test_closed_cache_returns_unavailable() {
    let state = AppState::from_config(&CacheConfig::default()).unwrap();
    let app = create_router(state.clone());

    send(&app, "PUT", "/set", Some(r#"{"key":"foo","value":"bar"}"#)).await;
    state.cache.close();

    let (status, _) = send(&app, "GET", "/get/foo", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let (status, _) = send(&app, "PUT", "/set", Some(r#"{"key":"foo","value":"bar"}"#)).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}
