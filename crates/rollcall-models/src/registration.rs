//! Register-students request.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidateEmail};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterStudentsDto {
    #[validate(email(message = "teacher must be a valid email address"))]
    pub teacher: String,
    /// Registered in order; duplicates collapse to a single association.
    #[validate(length(min = 1, message = "students must contain at least one email"))]
    pub students: Vec<String>,
}

impl RegisterStudentsDto {
    /// Student entries that are not syntactically valid email addresses.
    pub fn malformed_students(&self) -> Vec<&str> {
        self.students
            .iter()
            .filter(|email| !email.validate_email())
            .map(String::as_str)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(teacher: &str, students: &[&str]) -> RegisterStudentsDto {
        RegisterStudentsDto {
            teacher: teacher.to_string(),
            students: students.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_valid_request() {
        let dto = dto(
            "teacherken@gmail.com",
            &["studentjon@gmail.com", "studenthon@gmail.com"],
        );
        assert!(dto.validate().is_ok());
        assert!(dto.malformed_students().is_empty());
    }

    #[test]
    fn test_invalid_teacher_email() {
        assert!(dto("teacherken", &["studentjon@gmail.com"]).validate().is_err());
    }

    #[test]
    fn test_empty_student_list() {
        assert!(dto("teacherken@gmail.com", &[]).validate().is_err());
    }

    #[test]
    fn test_malformed_students_are_reported() {
        let dto = dto("teacherken@gmail.com", &["ok@test.com", "not-an-email", ""]);
        assert_eq!(dto.malformed_students(), vec!["not-an-email", ""]);
    }

    #[test]
    fn test_deserialize_from_json() {
        let dto: RegisterStudentsDto = serde_json::from_str(
            r#"{"teacher":"teacherken@gmail.com","students":["studentjon@gmail.com"]}"#,
        )
        .unwrap();
        assert_eq!(dto.teacher, "teacherken@gmail.com");
        assert_eq!(dto.students, vec!["studentjon@gmail.com"]);
    }
}
