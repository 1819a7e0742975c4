//! Process-local directory store.
//!
//! A unit of work locks the whole directory and mutates a private copy of it;
//! `commit` writes the copy back. Units are therefore fully serialised, which
//! is stronger than the Postgres store guarantees but keeps tests
//! deterministic.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use rollcall_core::StoreError;
use rollcall_models::{Enrollment, Student, StudentId, Teacher, TeacherId};
use tokio::sync::{Mutex, OwnedMutexGuard};

use super::{DirectoryStore, DirectoryUnit, StoreResult};

#[derive(Debug, Default, Clone)]
struct Directory {
    last_teacher_id: i64,
    last_student_id: i64,
    teachers: BTreeMap<TeacherId, Teacher>,
    teacher_ids: HashMap<String, TeacherId>,
    students: BTreeMap<StudentId, Student>,
    student_ids: HashMap<String, StudentId>,
    /// Keyed student-first so iteration matches the enrollment ordering.
    associations: BTreeSet<(StudentId, TeacherId)>,
}

#[derive(Debug, Default, Clone)]
pub struct MemoryDirectoryStore {
    directory: Arc<Mutex<Directory>>,
    unavailable: Arc<AtomicBool>,
}

impl MemoryDirectoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// While set, every `begin` fails with a connection error.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub async fn association_count(&self) -> usize {
        self.directory.lock().await.associations.len()
    }

    pub async fn student(&self, email: &str) -> Option<Student> {
        let directory = self.directory.lock().await;
        directory
            .student_ids
            .get(email)
            .and_then(|id| directory.students.get(id))
            .cloned()
    }

    pub async fn teacher(&self, email: &str) -> Option<Teacher> {
        let directory = self.directory.lock().await;
        directory
            .teacher_ids
            .get(email)
            .and_then(|id| directory.teachers.get(id))
            .cloned()
    }
}

#[async_trait]
impl DirectoryStore for MemoryDirectoryStore {
    async fn begin(&self) -> StoreResult<Box<dyn DirectoryUnit>> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::connection("in-memory directory is unavailable"));
        }

        let guard = self.directory.clone().lock_owned().await;
        let working = guard.clone();
        Ok(Box::new(MemoryUnit { guard, working }))
    }
}

struct MemoryUnit {
    guard: OwnedMutexGuard<Directory>,
    working: Directory,
}

#[async_trait]
impl DirectoryUnit for MemoryUnit {
    async fn find_teacher(&mut self, email: &str) -> StoreResult<Option<Teacher>> {
        let directory = &self.working;
        Ok(directory
            .teacher_ids
            .get(email)
            .and_then(|id| directory.teachers.get(id))
            .cloned())
    }

    async fn ensure_teacher(&mut self, email: &str) -> StoreResult<Teacher> {
        if let Some(existing) = self.find_teacher(email).await? {
            return Ok(existing);
        }

        let directory = &mut self.working;
        directory.last_teacher_id += 1;
        let teacher = Teacher {
            id: TeacherId::new(directory.last_teacher_id),
            email: email.to_string(),
            created_at: Utc::now(),
        };
        directory.teacher_ids.insert(teacher.email.clone(), teacher.id);
        directory.teachers.insert(teacher.id, teacher.clone());
        Ok(teacher)
    }

    async fn find_student(&mut self, email: &str) -> StoreResult<Option<Student>> {
        let directory = &self.working;
        Ok(directory
            .student_ids
            .get(email)
            .and_then(|id| directory.students.get(id))
            .cloned())
    }

    async fn find_students(&mut self, emails: &[String]) -> StoreResult<Vec<Student>> {
        let directory = &self.working;
        let wanted: BTreeSet<StudentId> = emails
            .iter()
            .filter_map(|email| directory.student_ids.get(email).copied())
            .collect();

        Ok(wanted
            .into_iter()
            .filter_map(|id| directory.students.get(&id).cloned())
            .collect())
    }

    async fn ensure_student(&mut self, email: &str) -> StoreResult<Student> {
        if let Some(existing) = self.find_student(email).await? {
            return Ok(existing);
        }

        let directory = &mut self.working;
        directory.last_student_id += 1;
        let now = Utc::now();
        let student = Student {
            id: StudentId::new(directory.last_student_id),
            email: email.to_string(),
            suspended: false,
            created_at: now,
            updated_at: now,
        };
        directory.student_ids.insert(student.email.clone(), student.id);
        directory.students.insert(student.id, student.clone());
        Ok(student)
    }

    async fn associate(
        &mut self,
        teacher_id: TeacherId,
        student_id: StudentId,
    ) -> StoreResult<bool> {
        let directory = &mut self.working;
        if !directory.teachers.contains_key(&teacher_id) {
            return Err(StoreError::query(format!("unknown teacher id {teacher_id}")));
        }
        if !directory.students.contains_key(&student_id) {
            return Err(StoreError::query(format!("unknown student id {student_id}")));
        }

        Ok(directory.associations.insert((student_id, teacher_id)))
    }

    async fn enrollments(&mut self, teacher_ids: &[TeacherId]) -> StoreResult<Vec<Enrollment>> {
        let directory = &self.working;
        let wanted: BTreeSet<TeacherId> = teacher_ids.iter().copied().collect();

        Ok(directory
            .associations
            .iter()
            .filter(|(_, teacher_id)| wanted.contains(teacher_id))
            .filter_map(|&(student_id, teacher_id)| {
                directory.students.get(&student_id).map(|student| Enrollment {
                    teacher_id,
                    student_id,
                    student_email: student.email.clone(),
                    student_suspended: student.suspended,
                })
            })
            .collect())
    }

    async fn set_suspended(&mut self, student_id: StudentId, suspended: bool) -> StoreResult<bool> {
        let student = self
            .working
            .students
            .get_mut(&student_id)
            .ok_or_else(|| StoreError::query(format!("unknown student id {student_id}")))?;

        if student.suspended == suspended {
            return Ok(false);
        }

        student.suspended = suspended;
        student.updated_at = Utc::now();
        Ok(true)
    }

    async fn commit(self: Box<Self>) -> StoreResult<()> {
        let MemoryUnit { mut guard, working } = *self;
        *guard = working;
        Ok(())
    }
}
