pub use rollcall_models::suspension::*;
