use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::directory::DirectoryError;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
    /// Populated only for notification validation failures.
    pub invalid_mentions: Vec<String>,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
            invalid_mentions: Vec::new(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn database<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn with_invalid_mentions(mut self, mentions: Vec<String>) -> Self {
        self.invalid_mentions = mentions;
        self
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status.as_u16(), error = %self.error, "Request failed");
        }

        let body = if self.invalid_mentions.is_empty() {
            json!({
                "error": self.error.to_string()
            })
        } else {
            json!({
                "error": self.error.to_string(),
                "invalid_mentions": self.invalid_mentions
            })
        };

        (self.status, Json(body)).into_response()
    }
}

impl From<DirectoryError> for AppError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::BadRequest(_) => AppError::bad_request(err),
            DirectoryError::NotFound { .. } => AppError::not_found(err),
            DirectoryError::InvalidMentions(ref mentions) => {
                let mentions = mentions.clone();
                AppError::bad_request(err).with_invalid_mentions(mentions)
            }
            DirectoryError::Store(_) => AppError::database(err),
        }
    }
}
