use axum::routing::get;
use axum::Router;

use crate::handlers::reports;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(reports::dashboard))
        .route("/product-sales", get(reports::product_sales))
        .route("/sales", get(reports::sales))
}
