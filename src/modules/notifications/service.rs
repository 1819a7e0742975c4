use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use rollcall_core::{DirectoryError, Entity};
use rollcall_models::Student;
use tracing::{info, instrument, warn};

use crate::metrics;
use crate::store::DirectoryStore;

use super::mentions::extract_mentions;

#[derive(Clone, Debug)]
pub struct NotificationService {
    store: Arc<dyn DirectoryStore>,
}

impl NotificationService {
    pub fn new(store: Arc<dyn DirectoryStore>) -> Self {
        Self { store }
    }

    /// Students who should receive `notification` from `teacher_email`.
    ///
    /// Mentioned students come first in mention order, followed by the
    /// teacher's registered students ascending by id. Suspended students and
    /// repeats are left out. Any mention that does not name an existing
    /// student fails the whole call with [`DirectoryError::InvalidMentions`].
    #[instrument(skip(self, notification))]
    pub async fn resolve_recipients(
        &self,
        teacher_email: &str,
        notification: &str,
    ) -> Result<Vec<String>, DirectoryError> {
        let mut unit = self.store.begin().await?;

        let teacher = unit
            .find_teacher(teacher_email)
            .await?
            .ok_or_else(|| DirectoryError::not_found(Entity::Teacher, teacher_email))?;

        let mentions = extract_mentions(notification);
        let known: HashMap<String, Student> = if mentions.is_empty() {
            HashMap::new()
        } else {
            unit.find_students(&mentions)
                .await?
                .into_iter()
                .map(|student| (student.email.clone(), student))
                .collect()
        };

        let invalid: Vec<String> = mentions
            .iter()
            .filter(|email| !known.contains_key(*email))
            .cloned()
            .collect();
        if !invalid.is_empty() {
            warn!(teacher.email = %teacher.email, invalid = ?invalid, "Notification mentions unknown students");
            metrics::track_invalid_mentions(invalid.len());
            return Err(DirectoryError::InvalidMentions(invalid));
        }

        let enrollments = unit.enrollments(&[teacher.id]).await?;
        unit.commit().await?;

        let mentioned = mentions
            .iter()
            .filter_map(|email| known.get(email))
            .map(|student| (student.email.as_str(), student.suspended));
        let registered = enrollments
            .iter()
            .map(|enrollment| (enrollment.student_email.as_str(), enrollment.student_suspended));

        let mut seen = HashSet::new();
        let recipients: Vec<String> = mentioned
            .chain(registered)
            .filter(|(_, suspended)| !suspended)
            .filter(|(email, _)| seen.insert(*email))
            .map(|(email, _)| email.to_string())
            .collect();

        metrics::track_notification_resolved(recipients.len());
        info!(
            teacher.email = %teacher.email,
            mentions = mentions.len(),
            recipients = recipients.len(),
            "Notification recipients resolved"
        );

        Ok(recipients)
    }
}
