use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::Arc;

use rollcall_core::{DirectoryError, Entity};
use rollcall_models::{Enrollment, StudentId, TeacherId};
use tracing::{debug, instrument};

use crate::store::DirectoryStore;

#[derive(Clone, Debug)]
pub struct CommonStudentsService {
    store: Arc<dyn DirectoryStore>,
}

impl CommonStudentsService {
    pub fn new(store: Arc<dyn DirectoryStore>) -> Self {
        Self { store }
    }

    /// Emails of the students registered to every teacher in
    /// `teacher_emails`, ascending by student id.
    ///
    /// Repeated teacher emails count once.
    #[instrument(skip(self))]
    pub async fn common_students(
        &self,
        teacher_emails: &[String],
    ) -> Result<Vec<String>, DirectoryError> {
        if teacher_emails.is_empty() {
            return Err(DirectoryError::bad_request(
                "At least one teacher must be specified",
            ));
        }

        let mut seen = HashSet::new();
        let distinct: Vec<&str> = teacher_emails
            .iter()
            .map(String::as_str)
            .filter(|email| seen.insert(*email))
            .collect();

        let mut unit = self.store.begin().await?;

        let mut teacher_ids = Vec::with_capacity(distinct.len());
        for email in distinct {
            let teacher = unit
                .find_teacher(email)
                .await?
                .ok_or_else(|| DirectoryError::not_found(Entity::Teacher, email))?;
            teacher_ids.push(teacher.id);
        }

        let enrollments = unit.enrollments(&teacher_ids).await?;
        unit.commit().await?;

        let students = students_common_to_all(&enrollments, &teacher_ids);
        debug!(
            teachers = teacher_ids.len(),
            students = students.len(),
            "Resolved common students"
        );

        Ok(students)
    }
}

/// Keeps the students linked to every teacher in `teachers`.
fn students_common_to_all(enrollments: &[Enrollment], teachers: &[TeacherId]) -> Vec<String> {
    let required: BTreeSet<TeacherId> = teachers.iter().copied().collect();

    let mut linked: BTreeMap<StudentId, (&str, BTreeSet<TeacherId>)> = BTreeMap::new();
    for enrollment in enrollments {
        if !required.contains(&enrollment.teacher_id) {
            continue;
        }
        linked
            .entry(enrollment.student_id)
            .or_insert_with(|| (enrollment.student_email.as_str(), BTreeSet::new()))
            .1
            .insert(enrollment.teacher_id);
    }

    linked
        .into_values()
        .filter(|(_, teachers)| teachers.len() == required.len())
        .map(|(email, _)| email.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::registration::RegistrationService;
    use crate::store::{DirectoryUnit, MemoryDirectoryStore};
    use rollcall_config::RegistrationPolicy;

    fn emails(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    /// t1: s1, s2, s3   t2: s2, s3, s4   t3: s3
    async fn classroom() -> (MemoryDirectoryStore, CommonStudentsService) {
        let store = MemoryDirectoryStore::new();
        let registration =
            RegistrationService::new(Arc::new(store.clone()), RegistrationPolicy::CreateMissing);
        registration
            .register(
                "t1@test.com",
                &emails(&["s1@test.com", "s2@test.com", "s3@test.com"]),
            )
            .await
            .unwrap();
        registration
            .register(
                "t2@test.com",
                &emails(&["s4@test.com", "s3@test.com", "s2@test.com"]),
            )
            .await
            .unwrap();
        registration
            .register("t3@test.com", &emails(&["s3@test.com"]))
            .await
            .unwrap();

        let service = CommonStudentsService::new(Arc::new(store.clone()));
        (store, service)
    }

    fn enrollment(teacher: i64, student: i64, email: &str) -> Enrollment {
        Enrollment {
            teacher_id: TeacherId::new(teacher),
            student_id: StudentId::new(student),
            student_email: email.to_string(),
            student_suspended: false,
        }
    }

    #[test]
    fn test_intersection_requires_every_teacher() {
        let enrollments = vec![
            enrollment(1, 1, "a@test.com"),
            enrollment(1, 2, "b@test.com"),
            enrollment(2, 2, "b@test.com"),
            enrollment(2, 3, "c@test.com"),
        ];
        let common =
            students_common_to_all(&enrollments, &[TeacherId::new(1), TeacherId::new(2)]);
        assert_eq!(common, vec!["b@test.com"]);
    }

    #[test]
    fn test_intersection_ignores_duplicate_teacher_ids() {
        let enrollments = vec![enrollment(1, 1, "a@test.com")];
        let common =
            students_common_to_all(&enrollments, &[TeacherId::new(1), TeacherId::new(1)]);
        assert_eq!(common, vec!["a@test.com"]);
    }

    #[tokio::test]
    async fn test_single_teacher_returns_registered_students() {
        let (_, service) = classroom().await;
        let students = service
            .common_students(&emails(&["t1@test.com"]))
            .await
            .unwrap();
        assert_eq!(students, vec!["s1@test.com", "s2@test.com", "s3@test.com"]);
    }

    #[tokio::test]
    async fn test_two_teachers_intersect() {
        let (_, service) = classroom().await;
        let students = service
            .common_students(&emails(&["t1@test.com", "t2@test.com"]))
            .await
            .unwrap();
        assert_eq!(students, vec!["s2@test.com", "s3@test.com"]);
    }

    #[tokio::test]
    async fn test_order_of_teachers_does_not_matter() {
        let (_, service) = classroom().await;
        let forward = service
            .common_students(&emails(&["t1@test.com", "t2@test.com", "t3@test.com"]))
            .await
            .unwrap();
        let backward = service
            .common_students(&emails(&["t3@test.com", "t2@test.com", "t1@test.com"]))
            .await
            .unwrap();
        assert_eq!(forward, vec!["s3@test.com"]);
        assert_eq!(forward, backward);
    }

    #[tokio::test]
    async fn test_duplicate_teachers_match_deduplicated_input() {
        let (_, service) = classroom().await;
        let duplicated = service
            .common_students(&emails(&["t1@test.com", "t2@test.com", "t1@test.com"]))
            .await
            .unwrap();
        let distinct = service
            .common_students(&emails(&["t1@test.com", "t2@test.com"]))
            .await
            .unwrap();
        assert_eq!(duplicated, distinct);
        assert!(!duplicated.is_empty());
    }

    #[tokio::test]
    async fn test_suspended_students_are_still_common() {
        let (store, service) = classroom().await;
        let student = store.student("s3@test.com").await.unwrap();
        let mut unit = store.begin().await.unwrap();
        unit.set_suspended(student.id, true).await.unwrap();
        unit.commit().await.unwrap();

        let students = service
            .common_students(&emails(&["t3@test.com"]))
            .await
            .unwrap();
        assert_eq!(students, vec!["s3@test.com"]);
    }

    #[tokio::test]
    async fn test_empty_teacher_set_is_bad_request() {
        let (_, service) = classroom().await;
        let err = service.common_students(&[]).await.unwrap_err();
        assert!(matches!(err, DirectoryError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_unknown_teacher_is_not_found() {
        let (_, service) = classroom().await;
        let err = service
            .common_students(&emails(&["t1@test.com", "ghost@test.com", "nobody@test.com"]))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DirectoryError::NotFound { entity: Entity::Teacher, ref email } if email == "ghost@test.com"
        ));
    }

    #[tokio::test]
    async fn test_teacher_without_students_returns_empty() {
        let store = MemoryDirectoryStore::new();
        let mut unit = store.begin().await.unwrap();
        unit.ensure_teacher("lonely@test.com").await.unwrap();
        unit.commit().await.unwrap();

        let service = CommonStudentsService::new(Arc::new(store));
        let students = service
            .common_students(&emails(&["lonely@test.com"]))
            .await
            .unwrap();
        assert!(students.is_empty());
    }
}
