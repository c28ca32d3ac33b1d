//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use lru_cache_server::{api::create_router, AppState, CacheEngine};
use serde_json::Value;
use tower::ServiceExt;

// == Helper Functions ==

fn create_test_app(capacity: usize) -> Router {
    create_router(AppState::new(CacheEngine::new(capacity)))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn call(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

// == ADD Endpoint Tests ==

#[tokio::test]
async fn test_add_endpoint_success() {
    let app = create_test_app(4);

    let (status, json) = call(&app, "/add?key=test_key&value=test_value").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["key"], "test_key");
    assert!(json["message"].as_str().unwrap().contains("test_key"));
}

#[tokio::test]
async fn test_add_endpoint_missing_parameters() {
    let app = create_test_app(4);

    let (status, json) = call(&app, "/add?value=v").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("key"));

    let (status, json) = call(&app, "/add?key=k").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("value"));

    let (status, _) = call(&app, "/add?key=&value=v").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Nothing was stored by the rejected calls
    let (_, json) = call(&app, "/get_all").await;
    assert_eq!(json["count"], 0);
}

#[tokio::test]
async fn test_add_endpoint_url_decodes_parameters() {
    let app = create_test_app(4);

    call(&app, "/add?key=hello%20world&value=a%26b").await;
    let (_, json) = call(&app, "/get?key=hello%20world").await;

    assert_eq!(json["found"], true);
    assert_eq!(json["value"], "a&b");
}

// == GET Endpoint Tests ==

#[tokio::test]
async fn test_get_endpoint_success() {
    let app = create_test_app(4);

    call(&app, "/add?key=get_key&value=get_value").await;
    let (status, json) = call(&app, "/get?key=get_key").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["key"], "get_key");
    assert_eq!(json["value"], "get_value");
    assert_eq!(json["found"], true);
}

#[tokio::test]
async fn test_get_endpoint_not_found() {
    let app = create_test_app(4);

    let (status, json) = call(&app, "/get?key=nonexistent_key").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["found"], false);
    assert!(json["value"].is_null());
}

#[tokio::test]
async fn test_get_endpoint_requires_key() {
    let app = create_test_app(4);

    let (status, json) = call(&app, "/get").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json.get("error").is_some());
}

// == REMOVE Endpoint Tests ==

#[tokio::test]
async fn test_remove_endpoint() {
    let app = create_test_app(4);

    call(&app, "/add?key=delete_key&value=delete_value").await;

    let (status, json) = call(&app, "/remove?key=delete_key").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["removed"], true);

    let (_, json) = call(&app, "/get?key=delete_key").await;
    assert_eq!(json["found"], false);
}

#[tokio::test]
async fn test_remove_endpoint_absent_key() {
    let app = create_test_app(4);
    call(&app, "/add?key=a&value=1").await;

    let (status, json) = call(&app, "/remove?key=nonexistent_key").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["removed"], false);
    let (_, json) = call(&app, "/get_all").await;
    assert_eq!(json["count"], 1);
}

// == CLEAR / CAP Endpoint Tests ==

#[tokio::test]
async fn test_clear_endpoint() {
    let app = create_test_app(4);

    call(&app, "/add?key=a&value=1").await;
    call(&app, "/add_with_ttl?key=b&value=2&duration=60").await;

    let (status, _) = call(&app, "/clear").await;
    assert_eq!(status, StatusCode::OK);

    let (_, json) = call(&app, "/get_all").await;
    assert_eq!(json["count"], 0);
    let (_, json) = call(&app, "/get?key=a").await;
    assert_eq!(json["found"], false);
}

#[tokio::test]
async fn test_cap_endpoint() {
    let app = create_test_app(7);

    let (status, json) = call(&app, "/cap").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["capacity"], 7);
}

// == Eviction via API ==

#[tokio::test]
async fn test_lru_eviction_via_api() {
    let app = create_test_app(4);

    for key in ["a", "b", "c", "d"] {
        call(&app, &format!("/add?key={key}&value={key}")).await;
    }
    let (_, json) = call(&app, "/get_all").await;
    assert_eq!(json["count"], 4);

    call(&app, "/add?key=e&value=e").await;

    let (_, json) = call(&app, "/get?key=a").await;
    assert_eq!(json["found"], false);
    let (_, json) = call(&app, "/get?key=e").await;
    assert_eq!(json["found"], true);

    let (_, json) = call(&app, "/get_all").await;
    let keys: Vec<&str> = json["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["key"].as_str().unwrap())
        .collect();
    assert_eq!(keys, vec!["e", "d", "c", "b"]);
}

// == TTL Expiration via API Tests ==

#[tokio::test]
async fn test_add_with_ttl_validation() {
    let app = create_test_app(4);

    for uri in [
        "/add_with_ttl?key=k&value=v",
        "/add_with_ttl?key=k&value=v&duration=",
        "/add_with_ttl?key=k&value=v&duration=-5",
        "/add_with_ttl?key=k&value=v&duration=ten",
    ] {
        let (status, json) = call(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert!(json.get("error").is_some());
    }
}

#[tokio::test]
async fn test_zero_duration_expires_immediately() {
    let app = create_test_app(4);

    let (status, _) = call(&app, "/add_with_ttl?key=k&value=v&duration=0").await;
    assert_eq!(status, StatusCode::OK);

    let (_, json) = call(&app, "/get?key=k").await;
    assert_eq!(json["found"], false);
}

#[tokio::test]
async fn test_ttl_expiration_via_api() {
    let app = create_test_app(4);

    let (status, json) = call(&app, "/add_with_ttl?key=ttl_test&value=expires_soon&duration=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["ttl"], 1);

    let (_, json) = call(&app, "/get?key=ttl_test").await;
    assert_eq!(json["found"], true);

    tokio::time::sleep(Duration::from_millis(1300)).await;

    let (_, json) = call(&app, "/get?key=ttl_test").await;
    assert_eq!(json["found"], false);
    let (_, json) = call(&app, "/get_all").await;
    assert_eq!(json["count"], 0);
}

#[tokio::test]
async fn test_ttl_overwrite_via_api() {
    let app = create_test_app(4);

    call(&app, "/add_with_ttl?key=a&value=short&duration=1").await;
    call(&app, "/add_with_ttl?key=a&value=long&duration=100").await;

    tokio::time::sleep(Duration::from_millis(1300)).await;

    let (_, json) = call(&app, "/get?key=a").await;
    assert_eq!(json["found"], true);
    assert_eq!(json["value"], "long");
}

// == HEALTH Endpoint Tests ==

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app(4);

    let (status, json) = call(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert!(json.get("timestamp").is_some());
}
