//! Inventory alert entity model.

use essenza_core::catalog::{AlertSeverity, Size};
use essenza_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `inventory_alerts` table.
///
/// Alerts are append-only: the scan inserts them and the only mutation is
/// the read acknowledgement. One alert covers one undersupplied size.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InventoryAlert {
    pub id: DbId,
    pub product_id: DbId,
    pub product_name: String,
    pub current_stock: i32,
    pub min_stock: i32,
    #[sqlx(try_from = "String")]
    pub size: Size,
    #[sqlx(try_from = "String")]
    pub severity: AlertSeverity,
    pub is_read: bool,
    pub created_at: Timestamp,
}
