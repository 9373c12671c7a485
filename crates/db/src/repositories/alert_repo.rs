//! Repository for the `inventory_alerts` table.

use essenza_core::catalog::{AlertSeverity, Size};
use essenza_core::order::product_display_name;
use essenza_core::types::DbId;
use sqlx::PgPool;

use crate::models::alert::InventoryAlert;
use crate::repositories::ProductRepo;

/// Column list for inventory_alerts queries.
const COLUMNS: &str = "id, product_id, product_name, current_stock, min_stock, \
    size, severity, is_read, created_at";

/// Provides the low-stock scan and alert acknowledgement.
pub struct AlertRepo;

impl AlertRepo {
    /// Scan active products and create one alert per undersupplied size:
    /// `critical` when that size is exhausted, `low` otherwise.
    ///
    /// Alerts are append-only; repeated scans re-report the same
    /// undersupply until staff restock. The scan runs in one transaction
    /// so it is all-or-nothing.
    pub async fn scan_low_stock(pool: &PgPool) -> Result<Vec<InventoryAlert>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        // Read inside the transaction: the recorded stock levels are the
        // ones this scan's inserts were decided on.
        let low_stock = ProductRepo::list_low_stock_on(&mut tx).await?;

        let mut created = Vec::new();

        let insert = format!(
            "INSERT INTO inventory_alerts
                (product_id, product_name, current_stock, min_stock, size, severity)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );

        for product in &low_stock {
            for size in [Size::OneOz, Size::TwoOz] {
                let stock = product.stock_for(size);
                if stock > product.min_stock {
                    continue;
                }
                let alert = sqlx::query_as::<_, InventoryAlert>(&insert)
                    .bind(product.id)
                    .bind(product_display_name(&product.brand, &product.fragrance))
                    .bind(stock)
                    .bind(product.min_stock)
                    .bind(size.as_str())
                    .bind(AlertSeverity::for_stock(stock).as_str())
                    .fetch_one(&mut *tx)
                    .await?;
                created.push(alert);
            }
        }

        tx.commit().await?;

        if !created.is_empty() {
            tracing::info!(count = created.len(), "Low-stock scan created alerts");
        }
        Ok(created)
    }

    /// List alerts, newest first, optionally restricted to unread ones.
    pub async fn list(pool: &PgPool, unread_only: bool) -> Result<Vec<InventoryAlert>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM inventory_alerts
             WHERE is_read = FALSE OR NOT $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, InventoryAlert>(&query)
            .bind(unread_only)
            .fetch_all(pool)
            .await
    }

    /// Acknowledge an alert. Returns `false` if it does not exist.
    pub async fn mark_read(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE inventory_alerts SET is_read = TRUE WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
