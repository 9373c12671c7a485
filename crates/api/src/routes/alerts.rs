use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::alerts;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(alerts::list))
        .route("/scan", post(alerts::scan))
        .route("/{id}/read", put(alerts::mark_read))
}
