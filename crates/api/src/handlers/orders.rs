//! Handlers for the `/orders` resource.
//!
//! Placement delegates to `OrderRepo::place`, which runs the whole
//! order/stock/customer write as one transaction.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use essenza_core::error::CoreError;
use essenza_core::order::OrderStatus;
use essenza_core::types::DbId;
use essenza_db::models::order::{Order, OrderWithLines, PlaceOrder, SetOrderStatus};
use essenza_db::repositories::OrderRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query params for `GET /orders`.
#[derive(Debug, Deserialize)]
pub struct OrderListParams {
    pub status: Option<OrderStatus>,
}

/// POST /api/v1/orders
pub async fn place(
    State(state): State<AppState>,
    Json(input): Json<PlaceOrder>,
) -> AppResult<(StatusCode, Json<DataResponse<OrderWithLines>>)> {
    let placed = OrderRepo::place(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: placed })))
}

/// GET /api/v1/orders
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<OrderListParams>,
) -> AppResult<Json<DataResponse<Vec<Order>>>> {
    let orders = OrderRepo::list(&state.pool, params.status).await?;
    Ok(Json(DataResponse { data: orders }))
}

/// GET /api/v1/orders/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<OrderWithLines>>> {
    let order = OrderRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Order",
            id,
        }))?;
    Ok(Json(DataResponse { data: order }))
}

/// PUT /api/v1/orders/{id}/status
pub async fn set_status(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SetOrderStatus>,
) -> AppResult<Json<DataResponse<Order>>> {
    let order = OrderRepo::set_status(&state.pool, id, input.status).await?;
    Ok(Json(DataResponse { data: order }))
}
