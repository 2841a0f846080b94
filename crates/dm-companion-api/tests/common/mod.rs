//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use dm_companion_core::clock::Clock;
use dm_companion_store::SqliteStore;
use dm_companion_test_support::FixedClock;
use http_body_util::BodyExt;
use tower::ServiceExt;

use dm_companion_api::routes;
use dm_companion_api::state::AppState;

/// Fixed timestamp used across all integration tests.
fn fixed_clock() -> Arc<dyn Clock + Send + Sync> {
    Arc::new(FixedClock(
        chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 1, 15, 10, 0, 0).unwrap(),
    ))
}

/// Opens a fresh in-memory store.
pub async fn test_store() -> Arc<SqliteStore> {
    Arc::new(SqliteStore::in_memory().await.unwrap())
}

/// Build the full app router over `store` with a deterministic clock. Uses
/// the same route structure as `main.rs`.
pub fn build_test_app(store: &Arc<SqliteStore>) -> Router {
    let app_state = AppState::new(fixed_clock(), store.clone(), store.clone());

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/characters", routes::character::router())
        .nest("/api/v1/encounters", routes::encounter::router())
        .with_state(app_state)
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Create a character through the API and return its id.
pub async fn create_character(store: &Arc<SqliteStore>, name: &str, hit_points: i32) -> String {
    let (status, json) = post_json(
        build_test_app(store),
        "/api/v1/characters/create",
        &serde_json::json!({
            "name": name,
            "class": "Fighter",
            "race": "Human",
            "hit_points": hit_points
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    json["id"].as_str().unwrap().to_string()
}

/// Create an encounter through the API and return its id.
pub async fn create_encounter(store: &Arc<SqliteStore>, title: &str) -> String {
    let (status, json) = post_json(
        build_test_app(store),
        "/api/v1/encounters/create",
        &serde_json::json!({ "title": title }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    json["id"].as_str().unwrap().to_string()
}
