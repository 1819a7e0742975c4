use axum::{Router, routing::post};

use crate::state::AppState;

use super::controller::retrieve_for_notifications;

pub fn init_notifications_router() -> Router<AppState> {
    Router::new().route("/retrievefornotifications", post(retrieve_for_notifications))
}
