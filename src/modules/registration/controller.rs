use anyhow::anyhow;
use axum::extract::State;
use axum::http::StatusCode;
use rollcall_core::AppError;
use tracing::instrument;

use crate::modules::ErrorResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::RegisterStudentsDto;

/// Register one or more students to a teacher
#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegisterStudentsDto,
    responses(
        (status = 204, description = "Students registered to the teacher"),
        (status = 400, description = "Bad request - malformed body or email", body = ErrorResponse),
        (status = 404, description = "Teacher or student not found (require_existing policy)", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Registration"
)]
#[instrument(skip(state))]
pub async fn register_students(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterStudentsDto>,
) -> Result<StatusCode, AppError> {
    let malformed = dto.malformed_students();
    if !malformed.is_empty() {
        return Err(AppError::bad_request(anyhow!(
            "Invalid student email(s): {}",
            malformed.join(", ")
        )));
    }

    state
        .registration_service()
        .register(&dto.teacher, &dto.students)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
