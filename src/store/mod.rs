//! Directory store port.
//!
//! Services never talk to a database directly. They receive an
//! `Arc<dyn DirectoryStore>` at construction and run each operation inside a
//! single [`DirectoryUnit`] obtained from [`DirectoryStore::begin`]. A unit is
//! the store's notion of one request's work: a transaction for
//! [`PgDirectoryStore`], an exclusive working copy for
//! [`MemoryDirectoryStore`]. Dropping a unit without calling
//! [`DirectoryUnit::commit`] discards its writes.
//!
//! Two registrations racing on the same teacher are serialised by the unit;
//! a notification resolution racing a suspension may or may not observe the
//! new flag. Stronger isolation is not attempted.

use std::fmt;

use async_trait::async_trait;
use rollcall_core::StoreError;
use rollcall_models::{Enrollment, Student, StudentId, Teacher, TeacherId};

pub mod memory;
pub mod postgres;

pub use memory::MemoryDirectoryStore;
pub use postgres::PgDirectoryStore;

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait DirectoryStore: Send + Sync + fmt::Debug {
    /// Opens a unit of work.
    async fn begin(&self) -> StoreResult<Box<dyn DirectoryUnit>>;
}

/// Operations available inside one unit of work.
#[async_trait]
pub trait DirectoryUnit: Send {
    async fn find_teacher(&mut self, email: &str) -> StoreResult<Option<Teacher>>;

    /// Inserts a teacher, or returns the existing row if the email is taken.
    async fn ensure_teacher(&mut self, email: &str) -> StoreResult<Teacher>;

    async fn find_student(&mut self, email: &str) -> StoreResult<Option<Student>>;

    /// Returns the subset of `emails` that exist, in no particular order.
    async fn find_students(&mut self, emails: &[String]) -> StoreResult<Vec<Student>>;

    /// Inserts a student, or returns the existing row if the email is taken.
    async fn ensure_student(&mut self, email: &str) -> StoreResult<Student>;

    /// Adds the edge. Returns `false` when it already existed.
    async fn associate(&mut self, teacher_id: TeacherId, student_id: StudentId)
    -> StoreResult<bool>;

    /// Every association touching any of `teacher_ids`, ordered by student id
    /// then teacher id.
    async fn enrollments(&mut self, teacher_ids: &[TeacherId]) -> StoreResult<Vec<Enrollment>>;

    /// Returns `false` when the flag already had the requested value.
    async fn set_suspended(&mut self, student_id: StudentId, suspended: bool)
    -> StoreResult<bool>;

    async fn commit(self: Box<Self>) -> StoreResult<()>;
}
