#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use rollcall::router::init_router;
use rollcall::state::AppState;
use rollcall::store::MemoryDirectoryStore;
use rollcall_config::{CorsConfig, RegistrationPolicy};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

/// Router over a fresh in-memory store. The store handle is returned so tests
/// can inspect what the API wrote.
pub fn setup_test_app(policy: RegistrationPolicy) -> (Router, MemoryDirectoryStore) {
    let store = MemoryDirectoryStore::new();
    let state = AppState::new(Arc::new(store.clone()), policy, CorsConfig::default());
    (init_router(state), store)
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap();
    send(app, request).await
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn register(app: &Router, teacher: &str, students: &[&str]) {
    let (status, _) = post_json(
        app,
        "/api/register",
        serde_json::json!({ "teacher": teacher, "students": students }),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

pub async fn suspend(app: &Router, student: &str) {
    let (status, _) = post_json(
        app,
        "/api/suspend",
        serde_json::json!({ "student": student }),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

/// `/api/commonstudents` query string for the given teachers, one `teacher=`
/// pair each.
pub fn common_students_uri(teachers: &[&str]) -> String {
    let query: Vec<String> = teachers
        .iter()
        .map(|t| format!("teacher={}", t.replace('@', "%40")))
        .collect();
    format!("/api/commonstudents?{}", query.join("&"))
}

pub fn strings(value: &Value) -> Vec<String> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect()
}
