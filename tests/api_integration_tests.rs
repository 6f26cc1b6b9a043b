//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use axum::{
    body::Body,
    http::{Request, Response, StatusCode},
    Router,
};
use serde_json::Value;
use sized_lru::{api::create_router, cache::CacheStore, AppState};
use std::time::Duration;
use tower::ServiceExt;

// == Helper Functions ==

fn create_app(max_size: i64, max_age: Duration) -> Router {
    let cache = CacheStore::new(max_size, max_age);
    let state = AppState::new(cache);
    create_router(state)
}

fn create_test_app() -> Router {
    create_app(1024, Duration::from_secs(300))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: &Router, method: &str, uri: &str) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn set(app: &Router, key: &str, value: &str) -> Response<Body> {
    let body = serde_json::json!({ "key": key, "value": value }).to_string();
    app.clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/set")
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn keys(app: &Router) -> Vec<String> {
    let response = send(app, "GET", "/keys").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    json["keys"]
        .as_array()
        .unwrap()
        .iter()
        .map(|k| k.as_str().unwrap().to_string())
        .collect()
}

// == SET Endpoint Tests ==

#[tokio::test]
async fn test_set_endpoint_success() {
    let app = create_test_app();

    let response = set(&app, "test_key", "test_value").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert!(json["message"].as_str().unwrap().contains("test_key"));
}

#[tokio::test]
async fn test_set_overwrite_replaces_value() {
    let app = create_test_app();

    set(&app, "k", "v1").await;
    set(&app, "k", "second").await;

    let response = send(&app, "GET", "/get/k").await;
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["value"].as_str().unwrap(), "second");
    assert_eq!(json["size"].as_i64().unwrap(), 7);

    let stats = body_to_json(send(&app, "GET", "/stats").await.into_body()).await;
    assert_eq!(stats["total_entries"].as_u64().unwrap(), 1);
    assert_eq!(stats["total_size"].as_i64().unwrap(), 7);
    assert_eq!(stats["evictions"].as_u64().unwrap(), 0);
}

// == GET / PEEK Endpoint Tests ==

#[tokio::test]
async fn test_get_endpoint_success() {
    let app = create_test_app();
    assert_eq!(set(&app, "get_key", "get_value").await.status(), StatusCode::OK);

    let response = send(&app, "GET", "/get/get_key").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["key"].as_str().unwrap(), "get_key");
    assert_eq!(json["value"].as_str().unwrap(), "get_value");
    assert_eq!(json["size"].as_i64().unwrap(), 16);
}

#[tokio::test]
async fn test_get_endpoint_not_found() {
    let app = create_test_app();

    let response = send(&app, "GET", "/get/nonexistent_key").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_to_json(response.into_body()).await;
    assert!(json["error"].as_str().unwrap().contains("nonexistent_key"));
}

#[tokio::test]
async fn test_get_touches_but_peek_does_not() {
    let app = create_test_app();
    set(&app, "a", "1").await;
    set(&app, "b", "2").await;
    set(&app, "c", "3").await;
    assert_eq!(keys(&app).await, vec!["c", "b", "a"]);

    let response = send(&app, "GET", "/peek/a").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(keys(&app).await, vec!["c", "b", "a"]);

    let response = send(&app, "GET", "/get/a").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(keys(&app).await, vec!["a", "c", "b"]);
}

// == DELETE Endpoint Tests ==

#[tokio::test]
async fn test_delete_endpoint_success() {
    let app = create_test_app();
    assert_eq!(
        set(&app, "delete_key", "delete_value").await.status(),
        StatusCode::OK
    );

    let del_response = send(&app, "DELETE", "/del/delete_key").await;
    assert_eq!(del_response.status(), StatusCode::OK);

    let get_response = send(&app, "GET", "/get/delete_key").await;
    assert_eq!(get_response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_endpoint_not_found() {
    let app = create_test_app();

    let response = send(&app, "DELETE", "/del/nonexistent_key").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// == Eviction Tests ==

#[tokio::test]
async fn test_size_eviction_via_api() {
    // every entry below weighs 10 bytes
    let app = create_app(30, Duration::from_secs(300));
    set(&app, "key1", "value1").await;
    set(&app, "key2", "value2").await;
    set(&app, "key3", "value3").await;
    send(&app, "GET", "/get/key1").await;

    set(&app, "key4", "value4").await;

    assert_eq!(keys(&app).await, vec!["key4", "key1", "key3"]);
    let response = send(&app, "GET", "/get/key2").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let stats = body_to_json(send(&app, "GET", "/stats").await.into_body()).await;
    assert_eq!(stats["evictions"].as_u64().unwrap(), 1);
    assert_eq!(stats["total_size"].as_i64().unwrap(), 30);
    assert_eq!(stats["max_size"].as_i64().unwrap(), 30);
}

#[tokio::test]
async fn test_age_expiration_via_api() {
    let app = create_app(1024, Duration::from_millis(50));

    let response = set(&app, "age_test", "expires_soon").await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, "GET", "/get/age_test").await;
    assert_eq!(response.status(), StatusCode::OK);

    tokio::time::sleep(Duration::from_millis(100)).await;

    let response = send(&app, "GET", "/peek/age_test").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(keys(&app).await.is_empty());
}

// == KEYS / STATS Endpoint Tests ==

#[tokio::test]
async fn test_keys_endpoint_limit() {
    let app = create_test_app();
    for key in ["a", "b", "c", "d"] {
        set(&app, key, "v").await;
    }

    let response = send(&app, "GET", "/keys?limit=2").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["count"].as_u64().unwrap(), 2);
    assert_eq!(json["keys"], serde_json::json!(["d", "c"]));
}

#[tokio::test]
async fn test_stats_endpoint() {
    let app = create_test_app();

    set(&app, "stats_key", "stats_value").await;
    send(&app, "GET", "/get/stats_key").await; // hit
    send(&app, "GET", "/get/nonexistent").await; // miss

    let response = send(&app, "GET", "/stats").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["hits"].as_u64().unwrap(), 1);
    assert_eq!(json["misses"].as_u64().unwrap(), 1);
    assert_eq!(json["total_entries"].as_u64().unwrap(), 1);
    assert_eq!(json["total_size"].as_i64().unwrap(), 20);
    assert!(json.get("hit_rate").is_some());
}

// == HEALTH Endpoint Tests ==

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();

    let response = send(&app, "GET", "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"].as_str().unwrap(), "healthy");
    assert!(json.get("timestamp").is_some());
}

// == Error Response Tests ==

#[tokio::test]
async fn test_invalid_json_request() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/set")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"invalid json"#))
                .unwrap(),
        )
        .await
        .unwrap();

    // Axum returns 400 or 422 for JSON parsing errors
    assert!(
        response.status() == StatusCode::BAD_REQUEST
            || response.status() == StatusCode::UNPROCESSABLE_ENTITY
    );
}

#[tokio::test]
async fn test_empty_key_request() {
    let app = create_test_app();

    let response = set(&app, "", "test").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert!(json.get("error").is_some());
}
