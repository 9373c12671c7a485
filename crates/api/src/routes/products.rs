use axum::routing::{get, post};
use axum::Router;

use crate::handlers::products;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(products::create).get(products::list))
        // fixed segment registered before the `{id}` captures
        .route("/low-stock", get(products::low_stock))
        .route(
            "/{id}",
            get(products::get_by_id)
                .put(products::update)
                .delete(products::deactivate),
        )
}
