//! # Rollcall Config
//!
//! Configuration types for the Rollcall API.
//!
//! This crate provides configuration structures loaded from environment variables:
//!
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`registration`]: create-or-reject policy for unknown teachers and students
//! - [`server`]: listen addresses and store backend selection
//!
//! # Example
//!
//! ```ignore
//! use rollcall_config::{CorsConfig, RegistrationPolicy, ServerConfig};
//!
//! let cors_config = CorsConfig::from_env();
//! let policy = RegistrationPolicy::from_env();
//! let server_config = ServerConfig::from_env();
//! ```

pub mod cors;
pub mod registration;
pub mod server;

pub use cors::CorsConfig;
pub use registration::RegistrationPolicy;
pub use server::{ServerConfig, StoreBackend};
