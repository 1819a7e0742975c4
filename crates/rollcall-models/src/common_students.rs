//! Common-students query and response.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Query string for the common-students lookup.
///
/// `teacher` may repeat (`?teacher=a&teacher=b`) and each value may itself be
/// a comma-separated list (`?teacher=a,b`).
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct CommonStudentsParams {
    #[serde(default)]
    #[param(style = Form, explode)]
    pub teacher: Vec<String>,
}

impl CommonStudentsParams {
    /// Flattens repeated and comma-delimited values, dropping blank entries.
    /// Order is preserved and duplicates are kept; the resolver dedupes.
    pub fn teacher_emails(&self) -> Vec<String> {
        self.teacher
            .iter()
            .flat_map(|value| value.split(','))
            .map(str::trim)
            .filter(|email| !email.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CommonStudentsResponse {
    pub students: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(values: &[&str]) -> CommonStudentsParams {
        CommonStudentsParams {
            teacher: values.iter().map(|v| v.to_string()).collect(),
        }
    }

    #[test]
    fn test_repeated_values() {
        let emails = params(&["a@test.com", "b@test.com"]).teacher_emails();
        assert_eq!(emails, vec!["a@test.com", "b@test.com"]);
    }

    #[test]
    fn test_comma_delimited_values() {
        let emails = params(&["a@test.com, b@test.com", "c@test.com"]).teacher_emails();
        assert_eq!(emails, vec!["a@test.com", "b@test.com", "c@test.com"]);
    }

    #[test]
    fn test_blank_values_are_dropped() {
        assert!(params(&["", " , "]).teacher_emails().is_empty());
        assert!(CommonStudentsParams::default().teacher_emails().is_empty());
    }
}
