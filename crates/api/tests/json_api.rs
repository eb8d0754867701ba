//! Integration tests for the `/api/v1` JSON endpoints.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_json, get};
use luxrent_api::session_cookie::SessionCookies;
use luxrent_core::types::SessionId;

// ---------------------------------------------------------------------------
// GET /api/v1/session
// ---------------------------------------------------------------------------

#[tokio::test]
async fn session_endpoint_requires_a_session() {
    let response = get(common::build_test_app(), "/api/v1/session", None).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn session_endpoint_returns_record_without_id() {
    let app = common::build_test_app();
    let cookie = common::login(app.clone(), "alice@example.com").await;

    let response = get(app, "/api/v1/session", Some(&cookie)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["email"], "alice@example.com");
    assert_eq!(json["data"]["display_name"], "alice");
    assert!(json["data"]["created_at"].is_string());
    assert!(json["data"]["last_seen_at"].is_string());
    assert!(json["data"].get("id").is_none());
}

#[tokio::test]
async fn store_outage_maps_to_503() {
    let config = common::test_config();
    let cookie = SessionCookies::new(&config.session).sign(&SessionId::generate());
    let app = common::build_test_app_with(config, Arc::new(common::UnavailableStore));

    let response = get(app, "/api/v1/session", Some(&cookie)).await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = body_json(response).await;
    assert_eq!(json["code"], "STORE_UNAVAILABLE");
    assert!(!json.to_string().contains("connection refused"));
}

// ---------------------------------------------------------------------------
// GET /api/v1/cars
// ---------------------------------------------------------------------------

#[tokio::test]
async fn cars_endpoint_requires_a_session() {
    let response = get(common::build_test_app(), "/api/v1/cars", None).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn cars_endpoint_lists_whole_catalogue() {
    let app = common::build_test_app();
    let cookie = common::login(app.clone(), "alice@example.com").await;

    let json = body_json(get(app, "/api/v1/cars", Some(&cookie)).await).await;

    let cars = json["data"].as_array().unwrap();
    assert_eq!(cars.len(), luxrent_core::catalogue::all().len());
    assert!(cars.iter().all(|car| car["name"].is_string() && car["image"].is_string()));
}

#[tokio::test]
async fn cars_endpoint_filters_case_insensitively() {
    let app = common::build_test_app();
    let cookie = common::login(app.clone(), "alice@example.com").await;

    let json = body_json(get(app, "/api/v1/cars?q=bmw", Some(&cookie)).await).await;

    let names: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|car| car["name"].as_str().unwrap())
        .collect();
    assert!(!names.is_empty());
    assert!(names.iter().all(|name| name.to_lowercase().contains("bmw")));
}

#[tokio::test]
async fn cars_endpoint_rejects_overlong_query() {
    let app = common::build_test_app();
    let cookie = common::login(app.clone(), "alice@example.com").await;
    let uri = format!("/api/v1/cars?q={}", "a".repeat(101));

    let response = get(app, &uri, Some(&cookie)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}
