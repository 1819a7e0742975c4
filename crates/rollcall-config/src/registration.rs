//! Registration policy configuration.
//!
//! Decides what registration does when it meets a teacher or student email
//! that is not in the directory yet. The same policy applies to both entity
//! types.
//!
//! # Environment Variables
//!
//! - `REGISTRATION_POLICY`: `create_missing` (default) or `require_existing`

use std::env;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationPolicy {
    /// Unknown teachers and students are created on first reference.
    #[default]
    CreateMissing,
    /// Unknown teachers and students are rejected as not found.
    RequireExisting,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown registration policy `{0}`, expected `create_missing` or `require_existing`")]
pub struct ParsePolicyError(String);

impl FromStr for RegistrationPolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "create_missing" | "lenient" => Ok(Self::CreateMissing),
            "require_existing" | "strict" => Ok(Self::RequireExisting),
            other => Err(ParsePolicyError(other.to_string())),
        }
    }
}

impl fmt::Display for RegistrationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateMissing => f.write_str("create_missing"),
            Self::RequireExisting => f.write_str("require_existing"),
        }
    }
}

impl RegistrationPolicy {
    /// Reads `REGISTRATION_POLICY`, falling back to the default when unset.
    ///
    /// # Panics
    ///
    /// Panics when the variable is set to an unrecognised value, so a typo
    /// never silently selects the wrong policy.
    pub fn from_env() -> Self {
        match env::var("REGISTRATION_POLICY") {
            Ok(raw) => raw.parse().unwrap_or_else(|e| panic!("{e}")),
            Err(_) => Self::default(),
        }
    }

    pub fn creates_missing(self) -> bool {
        matches!(self, Self::CreateMissing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_create_missing() {
        assert_eq!(RegistrationPolicy::default(), RegistrationPolicy::CreateMissing);
        assert!(RegistrationPolicy::default().creates_missing());
    }

    #[test]
    fn test_parse_accepts_aliases() {
        assert_eq!(
            "require-existing".parse::<RegistrationPolicy>(),
            Ok(RegistrationPolicy::RequireExisting)
        );
        assert_eq!(
            " STRICT ".parse::<RegistrationPolicy>(),
            Ok(RegistrationPolicy::RequireExisting)
        );
        assert_eq!(
            "lenient".parse::<RegistrationPolicy>(),
            Ok(RegistrationPolicy::CreateMissing)
        );
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "sometimes".parse::<RegistrationPolicy>().unwrap_err();
        assert!(err.to_string().contains("sometimes"));
    }

    #[test]
    fn test_display_round_trips() {
        for policy in [
            RegistrationPolicy::CreateMissing,
            RegistrationPolicy::RequireExisting,
        ] {
            assert_eq!(policy.to_string().parse::<RegistrationPolicy>(), Ok(policy));
        }
    }
}
