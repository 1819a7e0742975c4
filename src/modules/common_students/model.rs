//! Common-students DTOs.
//!
//! Re-exports the query and response types from the `rollcall-models` crate.

pub use rollcall_models::common_students::*;
