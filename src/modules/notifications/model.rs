pub use rollcall_models::notifications::*;
