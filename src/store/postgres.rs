use async_trait::async_trait;
use rollcall_core::StoreError;
use rollcall_models::{Enrollment, Student, StudentId, Teacher, TeacherId};
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{error, instrument};

use super::{DirectoryStore, DirectoryUnit, StoreResult};

/// Postgres-backed directory. Each unit of work is a transaction.
#[derive(Clone, Debug)]
pub struct PgDirectoryStore {
    pool: PgPool,
}

impl PgDirectoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn store_error(err: sqlx::Error) -> StoreError {
    error!(error = %err, "Directory store query failed");
    match err {
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StoreError::connection(err),
        other => StoreError::query(other),
    }
}

#[async_trait]
impl DirectoryStore for PgDirectoryStore {
    async fn begin(&self) -> StoreResult<Box<dyn DirectoryUnit>> {
        let tx = self.pool.begin().await.map_err(store_error)?;
        Ok(Box::new(PgUnit { tx }))
    }
}

struct PgUnit {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl DirectoryUnit for PgUnit {
    #[instrument(skip(self), fields(db.operation = "SELECT", db.table = "teachers"))]
    async fn find_teacher(&mut self, email: &str) -> StoreResult<Option<Teacher>> {
        sqlx::query_as::<_, Teacher>(
            "SELECT id, email, created_at FROM teachers WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(store_error)
    }

    #[instrument(skip(self), fields(db.operation = "INSERT", db.table = "teachers"))]
    async fn ensure_teacher(&mut self, email: &str) -> StoreResult<Teacher> {
        // The no-op update makes RETURNING yield the existing row on conflict.
        sqlx::query_as::<_, Teacher>(
            "INSERT INTO teachers (email) VALUES ($1)
             ON CONFLICT (email) DO UPDATE SET email = EXCLUDED.email
             RETURNING id, email, created_at",
        )
        .bind(email)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(store_error)
    }

    #[instrument(skip(self), fields(db.operation = "SELECT", db.table = "students"))]
    async fn find_student(&mut self, email: &str) -> StoreResult<Option<Student>> {
        sqlx::query_as::<_, Student>(
            "SELECT id, email, suspended, created_at, updated_at FROM students WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(store_error)
    }

    #[instrument(skip(self, emails), fields(db.operation = "SELECT", db.table = "students", count = emails.len()))]
    async fn find_students(&mut self, emails: &[String]) -> StoreResult<Vec<Student>> {
        if emails.is_empty() {
            return Ok(Vec::new());
        }

        sqlx::query_as::<_, Student>(
            "SELECT id, email, suspended, created_at, updated_at FROM students WHERE email = ANY($1) ORDER BY id",
        )
        .bind(emails)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(store_error)
    }

    #[instrument(skip(self), fields(db.operation = "INSERT", db.table = "students"))]
    async fn ensure_student(&mut self, email: &str) -> StoreResult<Student> {
        sqlx::query_as::<_, Student>(
            "INSERT INTO students (email) VALUES ($1)
             ON CONFLICT (email) DO UPDATE SET email = EXCLUDED.email
             RETURNING id, email, suspended, created_at, updated_at",
        )
        .bind(email)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(store_error)
    }

    #[instrument(skip(self), fields(db.operation = "INSERT", db.table = "teacher_students"))]
    async fn associate(
        &mut self,
        teacher_id: TeacherId,
        student_id: StudentId,
    ) -> StoreResult<bool> {
        let result = sqlx::query(
            "INSERT INTO teacher_students (teacher_id, student_id) VALUES ($1, $2)
             ON CONFLICT DO NOTHING",
        )
        .bind(teacher_id)
        .bind(student_id)
        .execute(&mut *self.tx)
        .await
        .map_err(store_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self), fields(db.operation = "SELECT", db.table = "teacher_students"))]
    async fn enrollments(&mut self, teacher_ids: &[TeacherId]) -> StoreResult<Vec<Enrollment>> {
        if teacher_ids.is_empty() {
            return Ok(Vec::new());
        }

        sqlx::query_as::<_, Enrollment>(
            "SELECT ts.teacher_id,
                    ts.student_id,
                    s.email AS student_email,
                    s.suspended AS student_suspended
             FROM teacher_students ts
             JOIN students s ON s.id = ts.student_id
             WHERE ts.teacher_id = ANY($1)
             ORDER BY ts.student_id, ts.teacher_id",
        )
        .bind(teacher_ids)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(store_error)
    }

    #[instrument(skip(self), fields(db.operation = "UPDATE", db.table = "students"))]
    async fn set_suspended(&mut self, student_id: StudentId, suspended: bool) -> StoreResult<bool> {
        let result = sqlx::query(
            "UPDATE students SET suspended = $2, updated_at = NOW()
             WHERE id = $1 AND suspended <> $2",
        )
        .bind(student_id)
        .bind(suspended)
        .execute(&mut *self.tx)
        .await
        .map_err(store_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn commit(self: Box<Self>) -> StoreResult<()> {
        self.tx.commit().await.map_err(store_error)
    }
}
