use axum::{Json, extract::State};
use axum_extra::extract::Query;
use rollcall_core::AppError;
use tracing::instrument;

use crate::modules::ErrorResponse;
use crate::state::AppState;

use super::model::{CommonStudentsParams, CommonStudentsResponse};

/// List students registered to every one of the given teachers
#[utoipa::path(
    get,
    path = "/api/commonstudents",
    params(CommonStudentsParams),
    responses(
        (status = 200, description = "Students common to all teachers", body = CommonStudentsResponse),
        (status = 400, description = "No teacher given", body = ErrorResponse),
        (status = 404, description = "Teacher not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Common Students"
)]
#[instrument(skip(state))]
pub async fn get_common_students(
    State(state): State<AppState>,
    Query(params): Query<CommonStudentsParams>,
) -> Result<Json<CommonStudentsResponse>, AppError> {
    let students = state
        .common_students_service()
        .common_students(&params.teacher_emails())
        .await?;

    Ok(Json(CommonStudentsResponse { students }))
}
