//! Handlers for the `/reports` resource.
//!
//! Reports are recomputed from the source collections on every call;
//! nothing here is cached.

use axum::extract::{Query, State};
use axum::Json;
use essenza_core::error::CoreError;
use essenza_core::stats::{DashboardStats, ProductSales, SalesReport};
use essenza_db::repositories::ReportRepo;

use crate::error::{AppError, AppResult};
use crate::query::DateRangeParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/reports/dashboard
pub async fn dashboard(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<DashboardStats>>> {
    let stats = ReportRepo::dashboard_stats(&state.pool).await?;
    Ok(Json(DataResponse { data: stats }))
}

/// GET /api/v1/reports/product-sales?start=...&end=...
pub async fn product_sales(
    State(state): State<AppState>,
    Query(params): Query<DateRangeParams>,
) -> AppResult<Json<DataResponse<Vec<ProductSales>>>> {
    if params.start > params.end {
        return Err(AppError::Core(CoreError::Validation(
            "start must not be after end".to_string(),
        )));
    }
    let report = ReportRepo::product_sales(&state.pool, params.start, params.end).await?;
    Ok(Json(DataResponse { data: report }))
}

/// GET /api/v1/reports/sales?start=...&end=...
pub async fn sales(
    State(state): State<AppState>,
    Query(params): Query<DateRangeParams>,
) -> AppResult<Json<DataResponse<SalesReport>>> {
    if params.start > params.end {
        return Err(AppError::Core(CoreError::Validation(
            "start must not be after end".to_string(),
        )));
    }
    let report = ReportRepo::sales_report(&state.pool, params.start, params.end).await?;
    Ok(Json(DataResponse { data: report }))
}
