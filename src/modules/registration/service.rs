use std::sync::Arc;

use rollcall_config::RegistrationPolicy;
use rollcall_core::{DirectoryError, Entity};
use rollcall_models::{Student, Teacher};
use tracing::{debug, info, instrument, warn};

use crate::metrics;
use crate::store::{DirectoryStore, DirectoryUnit};

/// What a successful registration changed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RegistrationOutcome {
    pub teacher_created: bool,
    pub students_created: usize,
    pub associations_added: usize,
}

#[derive(Clone, Debug)]
pub struct RegistrationService {
    store: Arc<dyn DirectoryStore>,
    policy: RegistrationPolicy,
}

impl RegistrationService {
    pub fn new(store: Arc<dyn DirectoryStore>, policy: RegistrationPolicy) -> Self {
        Self { store, policy }
    }

    /// Associates every student with the teacher, in input order.
    ///
    /// Under [`RegistrationPolicy::RequireExisting`] the first unknown student
    /// aborts the call with `NotFound`; associations made for the students
    /// before it are kept.
    #[instrument(skip(self, student_emails), fields(policy = %self.policy, students = student_emails.len()))]
    pub async fn register(
        &self,
        teacher_email: &str,
        student_emails: &[String],
    ) -> Result<RegistrationOutcome, DirectoryError> {
        let mut outcome = RegistrationOutcome::default();
        let mut unit = self.store.begin().await?;

        let teacher = self
            .resolve_teacher(unit.as_mut(), teacher_email, &mut outcome)
            .await?;

        for student_email in student_emails {
            let resolved = self
                .resolve_student(unit.as_mut(), student_email, &mut outcome)
                .await;
            let student = match resolved {
                Ok(student) => student,
                Err(err @ DirectoryError::NotFound { .. }) => {
                    warn!(
                        teacher.email = %teacher.email,
                        student.email = %student_email,
                        associations_added = outcome.associations_added,
                        "Registration stopped at unknown student"
                    );
                    unit.commit().await?;
                    return Err(err);
                }
                Err(err) => return Err(err),
            };

            if unit.associate(teacher.id, student.id).await? {
                outcome.associations_added += 1;
            } else {
                debug!(student.email = %student.email, "Student already registered to teacher");
            }
        }

        unit.commit().await?;
        metrics::track_associations_added(outcome.associations_added);

        info!(
            teacher.email = %teacher.email,
            teacher_created = outcome.teacher_created,
            students_created = outcome.students_created,
            associations_added = outcome.associations_added,
            "Students registered"
        );

        Ok(outcome)
    }

    async fn resolve_teacher(
        &self,
        unit: &mut dyn DirectoryUnit,
        email: &str,
        outcome: &mut RegistrationOutcome,
    ) -> Result<Teacher, DirectoryError> {
        if let Some(teacher) = unit.find_teacher(email).await? {
            return Ok(teacher);
        }

        if !self.policy.creates_missing() {
            return Err(DirectoryError::not_found(Entity::Teacher, email));
        }

        let teacher = unit.ensure_teacher(email).await?;
        outcome.teacher_created = true;
        metrics::track_entity_created("teacher");
        debug!(teacher.id = %teacher.id, teacher.email = %teacher.email, "Teacher created");
        Ok(teacher)
    }

    async fn resolve_student(
        &self,
        unit: &mut dyn DirectoryUnit,
        email: &str,
        outcome: &mut RegistrationOutcome,
    ) -> Result<Student, DirectoryError> {
        if let Some(student) = unit.find_student(email).await? {
            return Ok(student);
        }

        if !self.policy.creates_missing() {
            return Err(DirectoryError::not_found(Entity::Student, email));
        }

        let student = unit.ensure_student(email).await?;
        outcome.students_created += 1;
        metrics::track_entity_created("student");
        debug!(student.id = %student.id, student.email = %student.email, "Student created");
        Ok(student)
    }
}
