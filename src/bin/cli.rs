use std::sync::Arc;

use clap::{Parser, Subcommand};
use dialoguer::Input;
use dotenvy::dotenv;
use rollcall::cli::seeder::{SeedConfig, clear_seeded_data, seed_database};
use rollcall::cli::{create_student, create_teacher, unsuspend_student};
use rollcall::logging::init_basic_console_logging;
use rollcall::store::{DirectoryStore, PgDirectoryStore};
use rollcall_db::{init_db_pool, run_migrations};

#[derive(Parser)]
#[command(name = "rollcall-cli")]
#[command(about = "Rollcall CLI - Administrative tools for the teacher/student directory", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a teacher to the directory
    CreateTeacher {
        /// Email address (prompted if not provided)
        #[arg(short = 'e', long)]
        email: Option<String>,
    },
    /// Add a student to the directory
    CreateStudent {
        /// Email address (prompted if not provided)
        #[arg(short = 'e', long)]
        email: Option<String>,
    },
    /// Lift a student's suspension
    Unsuspend {
        /// Email address of the suspended student
        #[arg(short = 'e', long)]
        email: String,
    },
    /// Seed the database with fake teachers, students and registrations
    Seed {
        /// Number of teachers to create
        #[arg(short = 't', long, default_value = "10")]
        teachers: usize,

        /// Number of students to create
        #[arg(short = 's', long, default_value = "200")]
        students: usize,

        /// Students registered to each teacher
        #[arg(long, default_value = "25")]
        per_teacher: usize,
    },
    /// Remove every seeded teacher and student
    ClearSeed,
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_basic_console_logging();

    let cli = Cli::parse();

    let pool = init_db_pool().await;
    if let Err(e) = run_migrations(&pool).await {
        eprintln!("❌ Error running migrations: {}", e);
        std::process::exit(1);
    }
    let store = Arc::new(PgDirectoryStore::new(pool.clone()));

    match cli.command {
        Commands::CreateTeacher { email } => {
            let email = email_or_prompt(email);
            report(create_teacher(store.as_ref(), &email).await, "Teacher", &email);
        }
        Commands::CreateStudent { email } => {
            let email = email_or_prompt(email);
            report(create_student(store.as_ref(), &email).await, "Student", &email);
        }
        Commands::Unsuspend { email } => {
            let store: Arc<dyn DirectoryStore> = store;
            match unsuspend_student(store, &email).await {
                Ok(()) => println!("✅ {} is no longer suspended", email),
                Err(e) => fail("Error lifting suspension", e),
            }
        }
        Commands::Seed {
            teachers,
            students,
            per_teacher,
        } => {
            let config = SeedConfig {
                teachers,
                students,
                students_per_teacher: per_teacher,
            };
            if let Err(e) = seed_database(&pool, config).await {
                fail("Error seeding database", e);
            }
        }
        Commands::ClearSeed => {
            if let Err(e) = clear_seeded_data(&pool).await {
                fail("Error clearing seeded data", e);
            }
        }
    }
}

fn email_or_prompt(email: Option<String>) -> String {
    email.unwrap_or_else(|| {
        Input::new()
            .with_prompt("Email address")
            .interact_text()
            .unwrap_or_else(|e| fail("Failed to read email", e))
    })
}

fn report<E: std::fmt::Display>(result: Result<bool, E>, entity: &str, email: &str) {
    match result {
        Ok(true) => println!("✅ {} created: {}", entity, email),
        Ok(false) => println!("ℹ️  {} already exists: {}", entity, email),
        Err(e) => fail(&format!("Error creating {}", entity.to_lowercase()), e),
    }
}

fn fail(context: &str, err: impl std::fmt::Display) -> ! {
    eprintln!("\n❌ {}: {}", context, err);
    std::process::exit(1);
}
