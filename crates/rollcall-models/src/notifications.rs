//! Notification recipient request and response.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RetrieveForNotificationsDto {
    #[validate(email(message = "teacher must be a valid email address"))]
    pub teacher: String,
    /// Free text; `@student@example.com` tokens are treated as mentions.
    pub notification: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RecipientsResponse {
    pub recipients: Vec<String>,
}
