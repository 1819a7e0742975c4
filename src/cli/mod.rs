//! Helpers behind the `rollcall-cli` admin commands.
//!
//! Directory changes go through a [`DirectoryStore`] so the same checks apply
//! as over HTTP; bulk seeding talks to Postgres directly.

pub mod seeder;

use rollcall_core::DirectoryError;
use tracing::info;
use validator::ValidateEmail;

use crate::modules::suspension::SuspensionService;
use crate::store::DirectoryStore;
use std::sync::Arc;

fn require_email(email: &str) -> Result<(), DirectoryError> {
    if email.validate_email() {
        Ok(())
    } else {
        Err(DirectoryError::bad_request(format!(
            "'{email}' is not a valid email address"
        )))
    }
}

/// Adds a teacher. Returns `false` when the email was already registered.
pub async fn create_teacher(store: &dyn DirectoryStore, email: &str) -> Result<bool, DirectoryError> {
    require_email(email)?;
    let mut unit = store.begin().await?;
    if unit.find_teacher(email).await?.is_some() {
        return Ok(false);
    }
    let teacher = unit.ensure_teacher(email).await?;
    unit.commit().await?;
    info!(teacher.id = %teacher.id, teacher.email = %teacher.email, "Teacher created");
    Ok(true)
}

/// Adds a student. Returns `false` when the email was already registered.
pub async fn create_student(store: &dyn DirectoryStore, email: &str) -> Result<bool, DirectoryError> {
    require_email(email)?;
    let mut unit = store.begin().await?;
    if unit.find_student(email).await?.is_some() {
        return Ok(false);
    }
    let student = unit.ensure_student(email).await?;
    unit.commit().await?;
    info!(student.id = %student.id, student.email = %student.email, "Student created");
    Ok(true)
}

/// Lifts a suspension.
pub async fn unsuspend_student(
    store: Arc<dyn DirectoryStore>,
    email: &str,
) -> Result<(), DirectoryError> {
    SuspensionService::new(store).reinstate(email).await
}
