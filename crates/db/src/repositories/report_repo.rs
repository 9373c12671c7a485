//! Repository backing the dashboard and sales reports.
//!
//! Fetches lightweight row views and delegates the actual reductions to
//! `essenza_core::stats`, so report semantics stay in pure code.

use essenza_core::catalog::Size;
use essenza_core::order::OrderStatus;
use essenza_core::stats::{
    self, CompletedOrderView, CustomerAccountView, CustomerView, DashboardStats, OrderView,
    ProductSales, SalesReport, SoldLineView, StockView,
};
use essenza_core::types::{DbId, Money, Timestamp};
use sqlx::{FromRow, PgPool};

#[derive(FromRow)]
struct OrderRow {
    #[sqlx(try_from = "String")]
    status: OrderStatus,
    total: Money,
}

#[derive(FromRow)]
struct CustomerRow {
    is_vip: bool,
}

#[derive(FromRow)]
struct StockRow {
    stock_1oz: i32,
    stock_2oz: i32,
    min_stock: i32,
}

#[derive(FromRow)]
struct CompletedOrderRow {
    completed_at: Timestamp,
    total: Money,
}

#[derive(FromRow)]
struct CustomerAccountRow {
    id: DbId,
    name: String,
    total_orders: i32,
    total_spent: Money,
    last_order_at: Option<Timestamp>,
    is_vip: bool,
}

#[derive(FromRow)]
struct SoldLineRow {
    product_id: DbId,
    brand: String,
    fragrance: String,
    #[sqlx(try_from = "String")]
    size: Size,
    quantity: i32,
    line_total: Money,
}

/// Provides the dashboard summary and the per-product sales ranking.
pub struct ReportRepo;

impl ReportRepo {
    /// Recompute the dashboard summary from the current collections.
    /// Stock classification considers active products only, matching the
    /// catalog listing and the alert scan.
    pub async fn dashboard_stats(pool: &PgPool) -> Result<DashboardStats, sqlx::Error> {
        let orders: Vec<OrderRow> = sqlx::query_as("SELECT status, total FROM orders")
            .fetch_all(pool)
            .await?;
        let customers: Vec<CustomerRow> = sqlx::query_as("SELECT is_vip FROM customers")
            .fetch_all(pool)
            .await?;
        let products: Vec<StockRow> = sqlx::query_as(
            "SELECT stock_1oz, stock_2oz, min_stock FROM products WHERE is_active = TRUE",
        )
        .fetch_all(pool)
        .await?;

        let order_views: Vec<OrderView> = orders
            .iter()
            .map(|o| OrderView {
                status: o.status,
                total: o.total,
            })
            .collect();
        let customer_views: Vec<CustomerView> = customers
            .iter()
            .map(|c| CustomerView { is_vip: c.is_vip })
            .collect();
        let stock_views: Vec<StockView> = products
            .iter()
            .map(|p| StockView {
                stock_1oz: p.stock_1oz,
                stock_2oz: p.stock_2oz,
                min_stock: p.min_stock,
            })
            .collect();

        Ok(stats::dashboard_stats(
            &order_views,
            &customer_views,
            &stock_views,
        ))
    }

    /// Per-product sales over completed orders whose completion timestamp
    /// falls within `[start, end]` inclusive, ranked by revenue.
    pub async fn product_sales(
        pool: &PgPool,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<ProductSales>, sqlx::Error> {
        let lines = Self::sold_lines_between(pool, start, end).await?;
        Ok(stats::product_sales(&lines))
    }

    /// Period summary for the statistics/finances pages: window totals,
    /// average order value, day-by-day sales, and the top products and
    /// customers.
    pub async fn sales_report(
        pool: &PgPool,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<SalesReport, sqlx::Error> {
        let orders: Vec<CompletedOrderRow> = sqlx::query_as(
            "SELECT completed_at, total FROM orders
             WHERE status = 'completed'
               AND completed_at >= $1
               AND completed_at <= $2",
        )
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await?;

        let lines = Self::sold_lines_between(pool, start, end).await?;

        let customers: Vec<CustomerAccountRow> = sqlx::query_as(
            "SELECT id, name, total_orders, total_spent, last_order_at, is_vip
             FROM customers
             ORDER BY total_spent DESC, created_at",
        )
        .fetch_all(pool)
        .await?;

        let order_views: Vec<CompletedOrderView> = orders
            .iter()
            .map(|o| CompletedOrderView {
                completed_at: o.completed_at,
                total: o.total,
            })
            .collect();
        let customer_views: Vec<CustomerAccountView> = customers
            .into_iter()
            .map(|c| CustomerAccountView {
                customer_id: c.id,
                name: c.name,
                total_orders: c.total_orders,
                total_spent: c.total_spent,
                last_order_at: c.last_order_at,
                is_vip: c.is_vip,
            })
            .collect();

        Ok(stats::sales_report(
            start,
            end,
            &order_views,
            &lines,
            &customer_views,
        ))
    }

    /// Lines of completed orders in the window, in completion order.
    async fn sold_lines_between(
        pool: &PgPool,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<SoldLineView>, sqlx::Error> {
        let rows: Vec<SoldLineRow> = sqlx::query_as(
            "SELECT l.product_id, l.brand, l.fragrance, l.size, l.quantity, l.line_total
             FROM order_lines l
             JOIN orders o ON o.id = l.order_id
             WHERE o.status = 'completed'
               AND o.completed_at >= $1
               AND o.completed_at <= $2
             ORDER BY o.completed_at, o.id, l.position",
        )
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| SoldLineView {
                product_id: r.product_id,
                brand: r.brand,
                fragrance: r.fragrance,
                size: r.size,
                quantity: r.quantity,
                line_total: r.line_total,
            })
            .collect())
    }
}
