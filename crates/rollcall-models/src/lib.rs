//! # Rollcall Models
//!
//! Domain models and DTOs for the Rollcall API.
//!
//! # Modules
//!
//! - [`directory`]: teacher, student and enrollment entities
//! - [`ids`]: strongly-typed entity identifiers
//! - [`registration`]: register-students request
//! - [`common_students`]: common-students query and response
//! - [`suspension`]: suspend-student request
//! - [`notifications`]: notification recipient request and response

pub mod common_students;
pub mod directory;
pub mod ids;
pub mod notifications;
pub mod registration;
pub mod suspension;

pub use common_students::{CommonStudentsParams, CommonStudentsResponse};
pub use directory::{Enrollment, Student, Teacher};
pub use ids::{StudentId, TeacherId};
pub use notifications::{RecipientsResponse, RetrieveForNotificationsDto};
pub use registration::RegisterStudentsDto;
pub use suspension::SuspendStudentDto;
