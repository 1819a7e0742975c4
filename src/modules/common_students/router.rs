use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::get_common_students;

pub fn init_common_students_router() -> Router<AppState> {
    Router::new().route("/commonstudents", get(get_common_students))
}
