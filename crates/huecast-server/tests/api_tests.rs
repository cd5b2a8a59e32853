//! Integration tests for the huecast HTTP endpoints.
//!
//! Tests use Axum's `Router` directly via `tower::ServiceExt` without
//! starting a TCP server.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use huecast_core::ConnectionHandle;
use huecast_server::router::build_router;
use huecast_server::state::AppState;
use huecast_types::ColorValue;
use serde_json::{Value, json};
use tower::ServiceExt;

fn make_test_state() -> Arc<AppState> {
    Arc::new(AppState::default())
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_owned()))
        .unwrap()
}

// =========================================================================
// Tests
// =========================================================================

#[tokio::test]
async fn test_index_returns_html() {
    let router = build_router(make_test_state());

    let response = router
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("huecast"));
    assert!(html.contains("#ffffff"));
}

#[tokio::test]
async fn test_get_color_defaults_to_white() {
    let router = build_router(make_test_state());

    let response = router
        .oneshot(Request::get("/color").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json, json!({"r": 1.0, "g": 1.0, "b": 1.0}));
}

#[tokio::test]
async fn test_set_color_stores_and_acknowledges() {
    let state = make_test_state();
    let router = build_router(Arc::clone(&state));

    let response = router
        .clone()
        .oneshot(post_json("/set_color", r#"{"r":0.5,"g":0.2,"b":0.9}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(
        json,
        json!({"status": "ok", "color": {"r": 0.5, "g": 0.2, "b": 0.9}})
    );

    let response = router
        .oneshot(Request::get("/color").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json, json!({"r": 0.5, "g": 0.2, "b": 0.9}));
}

#[tokio::test]
async fn test_set_color_broadcasts_to_registered_viewers() {
    let state = make_test_state();
    let (handle, mut rx) = ConnectionHandle::channel(8);
    state.broadcaster.register(handle).await.unwrap();

    let router = build_router(Arc::clone(&state));
    let response = router
        .oneshot(post_json("/set_color", r#"{"r":1,"g":0,"b":0}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(rx.try_recv().unwrap().color(), ColorValue::WHITE);
    assert_eq!(
        rx.try_recv().unwrap().color(),
        ColorValue::new(1.0, 0.0, 0.0).unwrap()
    );
}

#[tokio::test]
async fn test_set_color_out_of_range_is_rejected() {
    let state = make_test_state();
    let router = build_router(Arc::clone(&state));

    let response = router
        .oneshot(post_json("/set_color", r#"{"r":1.5,"g":0.0,"b":0.0}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], 400);
    assert!(json["error"].as_str().unwrap().contains("`r`"));
    assert_eq!(state.store().get().await, ColorValue::WHITE);
}

#[tokio::test]
async fn test_set_color_missing_field_is_rejected() {
    let state = make_test_state();
    let router = build_router(Arc::clone(&state));

    let response = router
        .oneshot(post_json("/set_color", r#"{"r":0.1,"g":0.2}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], 400);
    assert_eq!(state.store().get().await, ColorValue::WHITE);
}

#[tokio::test]
async fn test_set_color_non_json_is_rejected() {
    let router = build_router(make_test_state());

    let response = router
        .oneshot(post_json("/set_color", "not json"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_set_color_wrong_type_is_rejected() {
    let router = build_router(make_test_state());

    let response = router
        .oneshot(post_json("/set_color", r#"{"r":"red","g":0,"b":0}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_status_reports_viewers() {
    let state = make_test_state();
    let (handle, _rx) = ConnectionHandle::channel(8);
    state.broadcaster.register(handle).await.unwrap();

    let router = build_router(state);
    let response = router
        .oneshot(Request::get("/status").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["viewers"], 1);
    assert_eq!(json["color"], json!({"r": 1.0, "g": 1.0, "b": 1.0}));
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let router = build_router(make_test_state());

    let response = router
        .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], 404);
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let router = build_router(make_test_state());

    let response = router
        .oneshot(
            Request::get("/color")
                .header("origin", "https://example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "*"
    );
}
