//! Suspend-student request.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SuspendStudentDto {
    #[validate(email(message = "student must be a valid email address"))]
    pub student: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation() {
        let valid = SuspendStudentDto {
            student: "studentmary@gmail.com".to_string(),
        };
        assert!(valid.validate().is_ok());

        let invalid = SuspendStudentDto {
            student: "studentmary".to_string(),
        };
        assert!(invalid.validate().is_err());
    }
}
