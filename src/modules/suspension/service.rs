use std::sync::Arc;

use rollcall_core::{DirectoryError, Entity};
use tracing::{debug, info, instrument};

use crate::metrics;
use crate::store::DirectoryStore;

#[derive(Clone, Debug)]
pub struct SuspensionService {
    store: Arc<dyn DirectoryStore>,
}

impl SuspensionService {
    pub fn new(store: Arc<dyn DirectoryStore>) -> Self {
        Self { store }
    }

    /// Marks the student suspended. Associations are left untouched.
    pub async fn suspend(&self, student_email: &str) -> Result<(), DirectoryError> {
        self.set_suspension(student_email, true).await
    }

    /// Clears the suspended flag.
    pub async fn reinstate(&self, student_email: &str) -> Result<(), DirectoryError> {
        self.set_suspension(student_email, false).await
    }

    #[instrument(skip(self))]
    async fn set_suspension(
        &self,
        student_email: &str,
        suspended: bool,
    ) -> Result<(), DirectoryError> {
        let mut unit = self.store.begin().await?;

        let student = unit
            .find_student(student_email)
            .await?
            .ok_or_else(|| DirectoryError::not_found(Entity::Student, student_email))?;

        let changed = unit.set_suspended(student.id, suspended).await?;
        unit.commit().await?;

        if changed {
            metrics::track_suspension_changed(suspended);
            info!(student.id = %student.id, student.email = %student.email, suspended, "Student suspension changed");
        } else {
            debug!(student.email = %student.email, suspended, "Suspension flag already set");
        }

        Ok(())
    }
}
