//! Handlers for the `/alerts` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use essenza_core::error::CoreError;
use essenza_core::types::DbId;
use essenza_db::models::alert::InventoryAlert;
use essenza_db::repositories::AlertRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query params for `GET /alerts` (`?unread=true` shows the badge feed).
#[derive(Debug, Deserialize)]
pub struct AlertListParams {
    #[serde(default)]
    pub unread: bool,
}

/// POST /api/v1/alerts/scan -- run the low-stock scan.
pub async fn scan(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<DataResponse<Vec<InventoryAlert>>>)> {
    let created = AlertRepo::scan_low_stock(&state.pool).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// GET /api/v1/alerts
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<AlertListParams>,
) -> AppResult<Json<DataResponse<Vec<InventoryAlert>>>> {
    let alerts = AlertRepo::list(&state.pool, params.unread).await?;
    Ok(Json(DataResponse { data: alerts }))
}

/// PUT /api/v1/alerts/{id}/read -- acknowledge an alert.
pub async fn mark_read(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let marked = AlertRepo::mark_read(&state.pool, id).await?;
    if marked {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "InventoryAlert",
            id,
        }))
    }
}
