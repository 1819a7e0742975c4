mod common;

use axum::http::StatusCode;
use common::{common_students_uri, get, post_json, register, setup_test_app, strings};
use rollcall_config::RegistrationPolicy;
use serde_json::json;

#[tokio::test]
async fn test_register_returns_no_content() {
    let (app, store) = setup_test_app(RegistrationPolicy::CreateMissing);

    let (status, body) = post_json(
        &app,
        "/api/register",
        json!({
            "teacher": "teacherken@gmail.com",
            "students": ["studentjon@gmail.com", "studenthon@gmail.com"]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());
    assert_eq!(store.association_count().await, 2);
}

#[tokio::test]
async fn test_registered_students_are_listed_for_teacher() {
    let (app, _) = setup_test_app(RegistrationPolicy::CreateMissing);
    register(
        &app,
        "teacherken@gmail.com",
        &["studentjon@gmail.com", "studenthon@gmail.com", "studentjon@gmail.com"],
    )
    .await;

    let (status, body) = get(&app, &common_students_uri(&["teacherken@gmail.com"])).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        strings(&body["students"]),
        vec!["studentjon@gmail.com", "studenthon@gmail.com"]
    );
}

#[tokio::test]
async fn test_register_twice_is_idempotent() {
    let (app, store) = setup_test_app(RegistrationPolicy::CreateMissing);
    register(&app, "teacherken@gmail.com", &["studentjon@gmail.com"]).await;
    register(&app, "teacherken@gmail.com", &["studentjon@gmail.com"]).await;

    assert_eq!(store.association_count().await, 1);
}

#[tokio::test]
async fn test_register_rejects_malformed_teacher() {
    let (app, store) = setup_test_app(RegistrationPolicy::CreateMissing);

    let (status, body) = post_json(
        &app,
        "/api/register",
        json!({ "teacher": "teacherken", "students": ["studentjon@gmail.com"] }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("teacher"));
    assert_eq!(store.association_count().await, 0);
}

#[tokio::test]
async fn test_register_rejects_malformed_student() {
    let (app, store) = setup_test_app(RegistrationPolicy::CreateMissing);

    let (status, body) = post_json(
        &app,
        "/api/register",
        json!({
            "teacher": "teacherken@gmail.com",
            "students": ["studentjon@gmail.com", "jon at gmail"]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("jon at gmail"));
    assert!(store.teacher("teacherken@gmail.com").await.is_none());
}

#[tokio::test]
async fn test_register_rejects_empty_student_list() {
    let (app, _) = setup_test_app(RegistrationPolicy::CreateMissing);

    let (status, _) = post_json(
        &app,
        "/api/register",
        json!({ "teacher": "teacherken@gmail.com", "students": [] }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_rejects_missing_field() {
    let (app, _) = setup_test_app(RegistrationPolicy::CreateMissing);

    let (status, body) = post_json(
        &app,
        "/api/register",
        json!({ "teacher": "teacherken@gmail.com" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "students is required");
}

#[tokio::test]
async fn test_require_existing_policy_returns_not_found() {
    let (app, store) = setup_test_app(RegistrationPolicy::RequireExisting);

    let (status, body) = post_json(
        &app,
        "/api/register",
        json!({ "teacher": "ghost@gmail.com", "students": ["studentjon@gmail.com"] }),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Teacher not found: ghost@gmail.com");
    assert!(store.student("studentjon@gmail.com").await.is_none());
}
