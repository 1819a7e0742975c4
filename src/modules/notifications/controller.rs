use axum::{Json, extract::State};
use rollcall_core::AppError;
use tracing::instrument;

use crate::modules::ErrorResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{RecipientsResponse, RetrieveForNotificationsDto};

/// Resolve who receives a notification
///
/// Recipients are the students mentioned in the text followed by the
/// teacher's own students, without duplicates and without suspended students.
#[utoipa::path(
    post,
    path = "/api/retrievefornotifications",
    request_body = RetrieveForNotificationsDto,
    responses(
        (status = 200, description = "Recipients of the notification", body = RecipientsResponse),
        (status = 400, description = "Bad request - malformed body or unknown mentioned students", body = ErrorResponse),
        (status = 404, description = "Teacher not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Notifications"
)]
#[instrument(skip(state, dto), fields(teacher = %dto.teacher))]
pub async fn retrieve_for_notifications(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RetrieveForNotificationsDto>,
) -> Result<Json<RecipientsResponse>, AppError> {
    let recipients = state
        .notification_service()
        .resolve_recipients(&dto.teacher, &dto.notification)
        .await?;

    Ok(Json(RecipientsResponse { recipients }))
}
