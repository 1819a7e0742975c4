use axum::extract::State;
use axum::http::StatusCode;
use rollcall_core::AppError;
use tracing::instrument;

use crate::modules::ErrorResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::SuspendStudentDto;

/// Suspend a student
///
/// Suspended students keep their teachers but stop receiving notifications.
/// Suspending an already suspended student succeeds.
#[utoipa::path(
    post,
    path = "/api/suspend",
    request_body = SuspendStudentDto,
    responses(
        (status = 204, description = "Student suspended"),
        (status = 400, description = "Bad request - malformed body or email", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Suspension"
)]
#[instrument(skip(state))]
pub async fn suspend_student(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<SuspendStudentDto>,
) -> Result<StatusCode, AppError> {
    state.suspension_service().suspend(&dto.student).await?;
    Ok(StatusCode::NO_CONTENT)
}
