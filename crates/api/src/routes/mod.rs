pub mod alerts;
pub mod customers;
pub mod health;
pub mod orders;
pub mod products;
pub mod reports;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /products                        create (POST), list (GET)
/// /products/low-stock              products at or below their minimum (GET)
/// /products/{id}                   get, update (PUT), deactivate (DELETE)
///
/// /customers                       create (POST), list (GET)
/// /customers/search?phone=...      lookup by phone, nullable result (GET)
/// /customers/{id}                  get, update (PUT)
/// /customers/{id}/orders           order history for a customer (GET)
///
/// /orders                          place (POST), list (GET)
/// /orders/{id}                     get with lines (GET)
/// /orders/{id}/status              transition status (PUT)
///
/// /alerts                          list (GET)
/// /alerts/scan                     scan stock and record alerts (POST)
/// /alerts/{id}/read                mark an alert as read (PUT)
///
/// /reports/dashboard               aggregate store metrics (GET)
/// /reports/product-sales           per-product sales over a date range (GET)
/// /reports/sales                   period summary with day-by-day sales (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/products", products::router())
        .nest("/customers", customers::router())
        .nest("/orders", orders::router())
        .nest("/alerts", alerts::router())
        .nest("/reports", reports::router())
}
