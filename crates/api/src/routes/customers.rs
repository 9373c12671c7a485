use axum::routing::{get, post};
use axum::Router;

use crate::handlers::customers;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(customers::create).get(customers::list))
        .route("/search", get(customers::search_by_phone))
        .route("/{id}", get(customers::get_by_id).put(customers::update))
        .route("/{id}/orders", get(customers::orders))
}
