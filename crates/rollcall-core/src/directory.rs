//! Failures raised by the directory services.
//!
//! Every service operation returns [`DirectoryError`]. Store implementations
//! only ever produce [`StoreError`], which the services wrap unchanged.

use std::fmt;

use thiserror::Error;

/// The kind of directory entity a failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Teacher,
    Student,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Teacher => f.write_str("Teacher"),
            Entity::Student => f.write_str("Student"),
        }
    }
}

/// Errors raised by a directory store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend could not be reached or a connection could not be acquired.
    #[error("store connection failed: {message}")]
    Connection { message: String },
    /// A statement failed during execution or row conversion.
    #[error("store query failed: {message}")]
    Query { message: String },
}

impl StoreError {
    pub fn connection(err: impl fmt::Display) -> Self {
        Self::Connection {
            message: err.to_string(),
        }
    }

    pub fn query(err: impl fmt::Display) -> Self {
        Self::Query {
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Malformed or semantically empty input.
    #[error("{0}")]
    BadRequest(String),

    /// A referenced teacher or student does not exist.
    #[error("{entity} not found: {email}")]
    NotFound { entity: Entity, email: String },

    /// Notification text mentions students that do not exist. Carries every
    /// offending mention, not just the first.
    #[error("Notification mentions unknown students: {}", .0.join(", "))]
    InvalidMentions(Vec<String>),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl DirectoryError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn not_found(entity: Entity, email: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            email: email.into(),
        }
    }
}
