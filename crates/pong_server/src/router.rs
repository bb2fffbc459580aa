//! Route table.

use crate::handlers::notes;
use crate::state::AppState;
use axum::routing::{get, post};
use axum::Router;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/pong", post(notes::send_note))
        .route("/pongs", get(notes::fetch_notes))
        .route("/clear", post(notes::clear_old_notes))
        .with_state(state)
}
