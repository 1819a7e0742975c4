use serde::Serialize;
use utoipa::ToSchema;

pub mod common_students;
pub mod notifications;
pub mod registration;
pub mod suspension;

/// Body of every non-2xx API response.
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    /// Present only when a notification mentions unknown students.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub invalid_mentions: Vec<String>,
}
