//! Directory entities.
//!
//! Teachers and students are keyed externally by email. An [`Enrollment`] is
//! one teacher–student association joined with the student row it points at.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::ids::{StudentId, TeacherId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Teacher {
    pub id: TeacherId,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Student {
    pub id: StudentId,
    pub email: String,
    /// Suspended students stay associated with their teachers but never
    /// receive notifications.
    pub suspended: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Enrollment {
    pub teacher_id: TeacherId,
    pub student_id: StudentId,
    pub student_email: String,
    pub student_suspended: bool,
}
