mod common;

use axum::http::StatusCode;
use common::{common_students_uri, get, register, setup_test_app, strings};
use rollcall_config::RegistrationPolicy;

async fn classroom() -> axum::Router {
    let (app, _) = setup_test_app(RegistrationPolicy::CreateMissing);
    register(
        &app,
        "teacherken@gmail.com",
        &["commonstudent1@gmail.com", "commonstudent2@gmail.com", "student_only_under_teacher_ken@gmail.com"],
    )
    .await;
    register(
        &app,
        "teacherjoe@gmail.com",
        &["commonstudent1@gmail.com", "commonstudent2@gmail.com"],
    )
    .await;
    app
}

#[tokio::test]
async fn test_single_teacher() {
    let app = classroom().await;

    let (status, body) = get(&app, &common_students_uri(&["teacherken@gmail.com"])).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        strings(&body["students"]),
        vec![
            "commonstudent1@gmail.com",
            "commonstudent2@gmail.com",
            "student_only_under_teacher_ken@gmail.com"
        ]
    );
}

#[tokio::test]
async fn test_repeated_teacher_keys() {
    let app = classroom().await;

    let (status, body) = get(
        &app,
        &common_students_uri(&["teacherken@gmail.com", "teacherjoe@gmail.com"]),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        strings(&body["students"]),
        vec!["commonstudent1@gmail.com", "commonstudent2@gmail.com"]
    );
}

#[tokio::test]
async fn test_comma_separated_teachers_match_repeated_keys() {
    let app = classroom().await;

    let (_, repeated) = get(
        &app,
        &common_students_uri(&["teacherjoe@gmail.com", "teacherken@gmail.com"]),
    )
    .await;
    let (status, comma) = get(
        &app,
        "/api/commonstudents?teacher=teacherken%40gmail.com,teacherjoe%40gmail.com",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(repeated, comma);
}

#[tokio::test]
async fn test_missing_teacher_is_bad_request() {
    let app = classroom().await;

    let (status, body) = get(&app, "/api/commonstudents").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_unknown_teacher_is_not_found() {
    let app = classroom().await;

    let (status, body) = get(
        &app,
        &common_students_uri(&["teacherken@gmail.com", "ghost@gmail.com"]),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Teacher not found: ghost@gmail.com");
}
