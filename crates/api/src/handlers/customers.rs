//! Handlers for the `/customers` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use essenza_core::error::CoreError;
use essenza_core::order::validate_customer_name;
use essenza_core::types::DbId;
use essenza_db::models::customer::{CreateCustomer, Customer, UpdateCustomer};
use essenza_db::models::order::Order;
use essenza_db::repositories::{CustomerRepo, OrderRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query params for `GET /customers` (`?vip=true` restricts to VIPs).
#[derive(Debug, Deserialize)]
pub struct CustomerListParams {
    #[serde(default)]
    pub vip: bool,
}

/// Query params for `GET /customers/search`.
#[derive(Debug, Deserialize)]
pub struct PhoneSearchParams {
    pub phone: String,
}

/// POST /api/v1/customers
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateCustomer>,
) -> AppResult<(StatusCode, Json<DataResponse<Customer>>)> {
    validate_customer_name(&input.name).map_err(AppError::Core)?;
    let customer = CustomerRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: customer })))
}

/// GET /api/v1/customers
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<CustomerListParams>,
) -> AppResult<Json<DataResponse<Vec<Customer>>>> {
    let customers = CustomerRepo::list(&state.pool, params.vip).await?;
    Ok(Json(DataResponse { data: customers }))
}

/// GET /api/v1/customers/search?phone=...
///
/// Returns `{ "data": null }` when no customer matches, mirroring the
/// nullable lookup the order form performs before creating a customer.
pub async fn search_by_phone(
    State(state): State<AppState>,
    Query(params): Query<PhoneSearchParams>,
) -> AppResult<Json<DataResponse<Option<Customer>>>> {
    let customer = CustomerRepo::find_by_phone(&state.pool, params.phone.trim()).await?;
    Ok(Json(DataResponse { data: customer }))
}

/// GET /api/v1/customers/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Customer>>> {
    let customer = CustomerRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Customer",
            id,
        }))?;
    Ok(Json(DataResponse { data: customer }))
}

/// PUT /api/v1/customers/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCustomer>,
) -> AppResult<Json<DataResponse<Customer>>> {
    if let Some(name) = &input.name {
        validate_customer_name(name).map_err(AppError::Core)?;
    }
    let customer = CustomerRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Customer",
            id,
        }))?;
    Ok(Json(DataResponse { data: customer }))
}

/// GET /api/v1/customers/{id}/orders
pub async fn orders(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Order>>>> {
    // Surface a 404 for unknown customers rather than an empty list.
    CustomerRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Customer",
            id,
        }))?;
    let orders = OrderRepo::list_by_customer(&state.pool, id).await?;
    Ok(Json(DataResponse { data: orders }))
}
