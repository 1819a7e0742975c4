//! Bulk fake data for local development.
//!
//! Every generated address ends in [`SEED_EMAIL_DOMAIN`] so
//! [`clear_seeded_data`] can remove exactly what was seeded.

use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};
use rand::seq::index::sample;
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};
use std::time::Instant;

pub const SEED_EMAIL_DOMAIN: &str = "seed.rollcall.com";

/// Rows per multi-value INSERT, well under the Postgres bind limit.
const BATCH_SIZE: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedConfig {
    pub teachers: usize,
    pub students: usize,
    pub students_per_teacher: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            teachers: 10,
            students: 200,
            students_per_teacher: 25,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub teachers: usize,
    pub students: usize,
    pub associations: u64,
}

fn seed_email(role: &str, index: usize) -> String {
    let first: String = FirstName().fake();
    let last: String = LastName().fake();
    let clean = |name: String| -> String {
        name.chars()
            .filter(char::is_ascii_alphanumeric)
            .collect::<String>()
            .to_lowercase()
    };
    format!(
        "{}.{}+{role}{index}@{SEED_EMAIL_DOMAIN}",
        clean(first),
        clean(last)
    )
}

/// Generates `count` unique seed addresses in parallel.
pub fn generate_emails(role: &str, count: usize) -> Vec<String> {
    (0..count)
        .into_par_iter()
        .map(|index| seed_email(role, index))
        .collect()
}

/// Picks `per_teacher` distinct students for every teacher. When there are
/// fewer students than `per_teacher`, each teacher gets all of them.
pub fn generate_associations(
    teacher_ids: &[i64],
    student_ids: &[i64],
    per_teacher: usize,
) -> Vec<(i64, i64)> {
    let amount = per_teacher.min(student_ids.len());
    teacher_ids
        .par_iter()
        .flat_map_iter(|&teacher_id| {
            let mut rng = rand::thread_rng();
            sample(&mut rng, student_ids.len(), amount)
                .into_iter()
                .map(move |index| (teacher_id, student_ids[index]))
                .collect::<Vec<_>>()
        })
        .collect()
}

pub async fn seed_database(db: &PgPool, config: SeedConfig) -> anyhow::Result<SeedSummary> {
    let start_time = Instant::now();

    println!("🌱 Starting database seeding...");
    println!(
        "   - {} teachers, {} students, {} students per teacher",
        config.teachers, config.students, config.students_per_teacher
    );

    let gen_start = Instant::now();
    let teacher_emails = generate_emails("teacher", config.teachers);
    let student_emails = generate_emails("student", config.students);
    println!(
        "   ✓ Generated {} addresses in {:?}",
        teacher_emails.len() + student_emails.len(),
        gen_start.elapsed()
    );

    let mut tx = db.begin().await?;

    let insert_start = Instant::now();
    let teacher_ids = insert_emails(&mut tx, "teachers", &teacher_emails).await?;
    let student_ids = insert_emails(&mut tx, "students", &student_emails).await?;
    println!(
        "   ✓ Inserted {} teachers and {} students in {:?}",
        teacher_ids.len(),
        student_ids.len(),
        insert_start.elapsed()
    );

    let link_start = Instant::now();
    let pairs = generate_associations(&teacher_ids, &student_ids, config.students_per_teacher);
    let associations = insert_associations(&mut tx, &pairs).await?;
    println!(
        "   ✓ Registered {} associations in {:?}",
        associations,
        link_start.elapsed()
    );

    tx.commit().await?;

    println!("\n✅ Seeding complete in {:?}", start_time.elapsed());

    Ok(SeedSummary {
        teachers: teacher_ids.len(),
        students: student_ids.len(),
        associations,
    })
}

/// Inserts `emails` into `table` (`teachers` or `students`) and returns the
/// ids, including those of rows that already existed.
async fn insert_emails(
    tx: &mut Transaction<'_, Postgres>,
    table: &'static str,
    emails: &[String],
) -> anyhow::Result<Vec<i64>> {
    let mut ids = Vec::with_capacity(emails.len());

    for chunk in emails.chunks(BATCH_SIZE) {
        let mut query = QueryBuilder::<Postgres>::new(format!("INSERT INTO {table} (email) "));
        query.push_values(chunk, |mut row, email| {
            row.push_bind(email);
        });
        query.push(" ON CONFLICT (email) DO UPDATE SET email = EXCLUDED.email RETURNING id");

        let chunk_ids: Vec<i64> = query
            .build_query_scalar()
            .fetch_all(&mut **tx)
            .await?;
        ids.extend(chunk_ids);
    }

    Ok(ids)
}

async fn insert_associations(
    tx: &mut Transaction<'_, Postgres>,
    pairs: &[(i64, i64)],
) -> anyhow::Result<u64> {
    let mut inserted = 0;

    for chunk in pairs.chunks(BATCH_SIZE) {
        let mut query =
            QueryBuilder::<Postgres>::new("INSERT INTO teacher_students (teacher_id, student_id) ");
        query.push_values(chunk, |mut row, (teacher_id, student_id)| {
            row.push_bind(*teacher_id).push_bind(*student_id);
        });
        query.push(" ON CONFLICT DO NOTHING");

        inserted += query.build().execute(&mut **tx).await?.rows_affected();
    }

    Ok(inserted)
}

/// Deletes every seeded teacher and student; their associations cascade.
pub async fn clear_seeded_data(db: &PgPool) -> anyhow::Result<(u64, u64)> {
    let start_time = Instant::now();
    println!("🗑️  Clearing seeded data...");

    let pattern = format!("%@{SEED_EMAIL_DOMAIN}");
    let mut tx = db.begin().await?;

    let teachers_deleted = sqlx::query("DELETE FROM teachers WHERE email LIKE $1")
        .bind(&pattern)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    let students_deleted = sqlx::query("DELETE FROM students WHERE email LIKE $1")
        .bind(&pattern)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    tx.commit().await?;

    println!(
        "   ✓ Deleted {} teachers and {} students in {:?}",
        teachers_deleted,
        students_deleted,
        start_time.elapsed()
    );

    Ok((teachers_deleted, students_deleted))
}
