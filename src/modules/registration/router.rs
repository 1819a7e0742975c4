use axum::{Router, routing::post};

use crate::state::AppState;

use super::controller::register_students;

pub fn init_registration_router() -> Router<AppState> {
    Router::new().route("/register", post(register_students))
}
