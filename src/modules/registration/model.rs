//! Registration DTOs.
//!
//! Re-exports the request type from the `rollcall-models` crate.

pub use rollcall_models::registration::*;
