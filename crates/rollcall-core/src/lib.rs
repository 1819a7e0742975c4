//! # Rollcall Core
//!
//! Core error types for the Rollcall API.
//!
//! - [`errors`]: HTTP-facing [`AppError`] with response conversion
//! - [`directory`]: typed failures raised by the directory services and stores
//!
//! # Example
//!
//! ```ignore
//! use rollcall_core::{AppError, DirectoryError, Entity};
//!
//! let err = DirectoryError::not_found(Entity::Teacher, "teacherken@gmail.com");
//! let response: AppError = err.into();
//! assert_eq!(response.status.as_u16(), 404);
//! ```

pub mod directory;
pub mod errors;

pub use directory::{DirectoryError, Entity, StoreError};
pub use errors::AppError;
