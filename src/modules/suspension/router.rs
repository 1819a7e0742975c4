use axum::{Router, routing::post};

use crate::state::AppState;

use super::controller::suspend_student;

pub fn init_suspension_router() -> Router<AppState> {
    Router::new().route("/suspend", post(suspend_student))
}
