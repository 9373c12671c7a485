//! Dashboard and sales-report reductions.
//!
//! Both operations are pure single-pass folds over row views fetched by
//! the repository layer. Nothing is cached: every call recomputes from
//! whatever rows it is handed.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::catalog::{is_undersupplied, Size};
use crate::order::{product_display_name, OrderStatus};
use crate::types::{DbId, Money, Timestamp};

/// Entries kept in the top-products / top-customers lists of a
/// [`SalesReport`].
pub const TOP_LIST_LEN: usize = 10;

/// Order fields needed by the dashboard reduction.
#[derive(Debug, Clone, Copy)]
pub struct OrderView {
    pub status: OrderStatus,
    pub total: Money,
}

/// Customer fields needed by the dashboard reduction.
#[derive(Debug, Clone, Copy)]
pub struct CustomerView {
    pub is_vip: bool,
}

/// Product stock fields needed by the dashboard reduction.
#[derive(Debug, Clone, Copy)]
pub struct StockView {
    pub stock_1oz: i32,
    pub stock_2oz: i32,
    pub min_stock: i32,
}

/// Summary counts for the main dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    /// Sum of `total` over completed orders only.
    pub total_sales: Money,
    pub total_orders: i64,
    pub pending_orders: i64,
    pub completed_orders: i64,
    pub total_customers: i64,
    pub vip_customers: i64,
    /// Products with either size at or below the minimum threshold.
    pub low_stock_products: i64,
    /// Products with either size exhausted.
    pub critical_stock_products: i64,
}

/// Reduce the full order/customer/product collections into dashboard
/// counts. Pure function of its inputs.
pub fn dashboard_stats(
    orders: &[OrderView],
    customers: &[CustomerView],
    products: &[StockView],
) -> DashboardStats {
    let mut stats = DashboardStats {
        total_sales: 0,
        total_orders: orders.len() as i64,
        pending_orders: 0,
        completed_orders: 0,
        total_customers: customers.len() as i64,
        vip_customers: customers.iter().filter(|c| c.is_vip).count() as i64,
        low_stock_products: 0,
        critical_stock_products: 0,
    };

    for order in orders {
        match order.status {
            OrderStatus::Pending => stats.pending_orders += 1,
            OrderStatus::Completed => {
                stats.completed_orders += 1;
                stats.total_sales += order.total;
            }
            OrderStatus::Cancelled => {}
        }
    }

    for product in products {
        if is_undersupplied(product.stock_1oz, product.min_stock)
            || is_undersupplied(product.stock_2oz, product.min_stock)
        {
            stats.low_stock_products += 1;
        }
        if product.stock_1oz == 0 || product.stock_2oz == 0 {
            stats.critical_stock_products += 1;
        }
    }

    stats
}

/// One order line from a completed order, as fed to [`product_sales`].
#[derive(Debug, Clone)]
pub struct SoldLineView {
    pub product_id: DbId,
    pub brand: String,
    pub fragrance: String,
    pub size: Size,
    pub quantity: i32,
    pub line_total: Money,
}

/// Per-product sales accumulated over a reporting window.
#[derive(Debug, Clone, Serialize)]
pub struct ProductSales {
    pub product_id: DbId,
    pub product_name: String,
    pub brand: String,
    pub fragrance: String,
    pub total_quantity: i64,
    pub total_revenue: Money,
    /// `total_revenue / total_quantity`; zero when nothing was sold.
    pub average_price: f64,
    pub size_1oz_sold: i64,
    pub size_2oz_sold: i64,
}

/// Accumulate sold lines into a per-product ranking, sorted by revenue
/// descending. Ties keep the order products were first encountered in
/// (the sort is stable and accumulation preserves input order).
pub fn product_sales(lines: &[SoldLineView]) -> Vec<ProductSales> {
    let mut ranking: Vec<ProductSales> = Vec::new();
    let mut index_by_product: HashMap<DbId, usize> = HashMap::new();

    for line in lines {
        let idx = *index_by_product.entry(line.product_id).or_insert_with(|| {
            ranking.push(ProductSales {
                product_id: line.product_id,
                product_name: product_display_name(&line.brand, &line.fragrance),
                brand: line.brand.clone(),
                fragrance: line.fragrance.clone(),
                total_quantity: 0,
                total_revenue: 0,
                average_price: 0.0,
                size_1oz_sold: 0,
                size_2oz_sold: 0,
            });
            ranking.len() - 1
        });

        let entry = &mut ranking[idx];
        entry.total_quantity += i64::from(line.quantity);
        entry.total_revenue += line.line_total;
        match line.size {
            Size::OneOz => entry.size_1oz_sold += i64::from(line.quantity),
            Size::TwoOz => entry.size_2oz_sold += i64::from(line.quantity),
        }
    }

    for entry in &mut ranking {
        if entry.total_quantity > 0 {
            entry.average_price = entry.total_revenue as f64 / entry.total_quantity as f64;
        }
    }

    ranking.sort_by(|a, b| b.total_revenue.cmp(&a.total_revenue));
    ranking
}

/// A completed order inside the reporting window, as fed to
/// [`sales_report`].
#[derive(Debug, Clone, Copy)]
pub struct CompletedOrderView {
    pub completed_at: Timestamp,
    pub total: Money,
}

/// Customer aggregate fields needed by [`customer_analytics`].
#[derive(Debug, Clone)]
pub struct CustomerAccountView {
    pub customer_id: DbId,
    pub name: String,
    pub total_orders: i32,
    pub total_spent: Money,
    pub last_order_at: Option<Timestamp>,
    pub is_vip: bool,
}

/// Per-customer spending profile derived from the lifetime aggregates.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerAnalytics {
    pub customer_id: DbId,
    pub customer_name: String,
    pub total_orders: i64,
    pub total_spent: Money,
    /// `total_spent / total_orders`; zero for customers who never ordered.
    pub average_order_value: f64,
    pub last_order_at: Option<Timestamp>,
    pub is_vip: bool,
}

/// Sales and order count for one calendar day of the reporting window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DaySales {
    pub date: NaiveDate,
    pub sales: Money,
    pub orders: i64,
}

/// Period summary for the statistics/finances pages: window totals, the
/// day-by-day breakdown, and the leading products and customers.
#[derive(Debug, Clone, Serialize)]
pub struct SalesReport {
    pub start: Timestamp,
    pub end: Timestamp,
    pub total_sales: Money,
    pub total_orders: i64,
    /// `total_sales / total_orders`; zero for an empty window.
    pub average_order_value: f64,
    pub top_products: Vec<ProductSales>,
    pub top_customers: Vec<CustomerAnalytics>,
    pub sales_by_day: Vec<DaySales>,
}

/// Derive each customer's spending profile from their lifetime
/// aggregates. Input order is preserved, so rows fetched biggest-spender
/// first come back ranked the same way.
pub fn customer_analytics(customers: &[CustomerAccountView]) -> Vec<CustomerAnalytics> {
    customers
        .iter()
        .map(|c| CustomerAnalytics {
            customer_id: c.customer_id,
            customer_name: c.name.clone(),
            total_orders: i64::from(c.total_orders),
            total_spent: c.total_spent,
            average_order_value: if c.total_orders > 0 {
                c.total_spent as f64 / f64::from(c.total_orders)
            } else {
                0.0
            },
            last_order_at: c.last_order_at,
            is_vip: c.is_vip,
        })
        .collect()
}

/// Reduce a reporting window into the period sales summary.
///
/// `orders` and `lines` must already be restricted to completed orders
/// whose `completed_at` falls within `[start, end]`; `customers` is the
/// full customer collection, biggest spenders first. The day buckets use
/// UTC calendar dates and cover every day of the window, including days
/// with no sales.
pub fn sales_report(
    start: Timestamp,
    end: Timestamp,
    orders: &[CompletedOrderView],
    lines: &[SoldLineView],
    customers: &[CustomerAccountView],
) -> SalesReport {
    let total_sales: Money = orders.iter().map(|o| o.total).sum();
    let total_orders = orders.len() as i64;
    let average_order_value = if total_orders > 0 {
        total_sales as f64 / total_orders as f64
    } else {
        0.0
    };

    let mut by_day: HashMap<NaiveDate, (Money, i64)> = HashMap::new();
    for order in orders {
        let bucket = by_day.entry(order.completed_at.date_naive()).or_default();
        bucket.0 += order.total;
        bucket.1 += 1;
    }

    let last_day = end.date_naive();
    let sales_by_day: Vec<DaySales> = start
        .date_naive()
        .iter_days()
        .take_while(|day| *day <= last_day)
        .map(|day| {
            let (sales, orders) = by_day.get(&day).copied().unwrap_or_default();
            DaySales {
                date: day,
                sales,
                orders,
            }
        })
        .collect();

    let mut top_products = product_sales(lines);
    top_products.truncate(TOP_LIST_LEN);
    let mut top_customers = customer_analytics(customers);
    top_customers.truncate(TOP_LIST_LEN);

    SalesReport {
        start,
        end,
        total_sales,
        total_orders,
        average_order_value,
        top_products,
        top_customers,
        sales_by_day,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(status: OrderStatus, total: Money) -> OrderView {
        OrderView { status, total }
    }

    #[test]
    fn dashboard_counts_completed_sales_only() {
        let orders = vec![
            order(OrderStatus::Completed, 15000),
            order(OrderStatus::Completed, 25000),
            order(OrderStatus::Pending, 10000),
        ];
        let stats = dashboard_stats(&orders, &[], &[]);
        assert_eq!(stats.total_sales, 40000);
        assert_eq!(stats.total_orders, 3);
        assert_eq!(stats.completed_orders, 2);
        assert_eq!(stats.pending_orders, 1);
    }

    #[test]
    fn cancelled_orders_count_toward_totals_but_not_sales() {
        let orders = vec![
            order(OrderStatus::Cancelled, 99000),
            order(OrderStatus::Completed, 1000),
        ];
        let stats = dashboard_stats(&orders, &[], &[]);
        assert_eq!(stats.total_orders, 2);
        assert_eq!(stats.total_sales, 1000);
        assert_eq!(stats.pending_orders, 0);
    }

    #[test]
    fn dashboard_counts_customers_and_vips() {
        let customers = vec![
            CustomerView { is_vip: true },
            CustomerView { is_vip: false },
            CustomerView { is_vip: true },
        ];
        let stats = dashboard_stats(&[], &customers, &[]);
        assert_eq!(stats.total_customers, 3);
        assert_eq!(stats.vip_customers, 2);
    }

    #[test]
    fn dashboard_classifies_stock_levels() {
        let products = vec![
            // Healthy on both sizes.
            StockView { stock_1oz: 20, stock_2oz: 20, min_stock: 5 },
            // 1oz at the threshold: low but not critical.
            StockView { stock_1oz: 5, stock_2oz: 20, min_stock: 5 },
            // 2oz exhausted: low and critical.
            StockView { stock_1oz: 20, stock_2oz: 0, min_stock: 5 },
        ];
        let stats = dashboard_stats(&[], &[], &products);
        assert_eq!(stats.low_stock_products, 2);
        assert_eq!(stats.critical_stock_products, 1);
    }

    #[test]
    fn dashboard_is_deterministic_for_same_input() {
        let orders = vec![order(OrderStatus::Completed, 5000)];
        let customers = vec![CustomerView { is_vip: false }];
        let products = vec![StockView { stock_1oz: 1, stock_2oz: 2, min_stock: 5 }];
        assert_eq!(
            dashboard_stats(&orders, &customers, &products),
            dashboard_stats(&orders, &customers, &products)
        );
    }

    fn sold(product_id: DbId, size: Size, quantity: i32, line_total: Money) -> SoldLineView {
        SoldLineView {
            product_id,
            brand: format!("Brand {product_id}"),
            fragrance: format!("Fragrance {product_id}"),
            size,
            quantity,
            line_total,
        }
    }

    #[test]
    fn product_sales_accumulates_per_product() {
        let lines = vec![
            sold(1, Size::OneOz, 2, 30000),
            sold(2, Size::TwoOz, 1, 25000),
            sold(1, Size::TwoOz, 1, 25000),
        ];
        let ranking = product_sales(&lines);
        assert_eq!(ranking.len(), 2);

        // Product 1: 55000 revenue, 3 units, ranked first.
        assert_eq!(ranking[0].product_id, 1);
        assert_eq!(ranking[0].total_quantity, 3);
        assert_eq!(ranking[0].total_revenue, 55000);
        assert_eq!(ranking[0].size_1oz_sold, 2);
        assert_eq!(ranking[0].size_2oz_sold, 1);
        assert!((ranking[0].average_price - 55000.0 / 3.0).abs() < f64::EPSILON);
        assert_eq!(ranking[0].product_name, "Brand 1 - Fragrance 1");

        assert_eq!(ranking[1].product_id, 2);
        assert_eq!(ranking[1].total_revenue, 25000);
    }

    #[test]
    fn revenue_ties_keep_first_seen_order() {
        let lines = vec![
            sold(7, Size::OneOz, 1, 10000),
            sold(3, Size::OneOz, 1, 10000),
        ];
        let ranking = product_sales(&lines);
        assert_eq!(ranking[0].product_id, 7);
        assert_eq!(ranking[1].product_id, 3);
    }

    #[test]
    fn empty_window_yields_empty_ranking() {
        assert!(product_sales(&[]).is_empty());
    }

    use chrono::{TimeZone, Utc};

    fn at(y: i32, m: u32, d: u32, h: u32) -> Timestamp {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn completed(completed_at: Timestamp, total: Money) -> CompletedOrderView {
        CompletedOrderView {
            completed_at,
            total,
        }
    }

    fn account(customer_id: DbId, total_orders: i32, total_spent: Money) -> CustomerAccountView {
        CustomerAccountView {
            customer_id,
            name: format!("Customer {customer_id}"),
            total_orders,
            total_spent,
            last_order_at: None,
            is_vip: false,
        }
    }

    #[test]
    fn sales_report_buckets_by_utc_day_and_fills_gaps() {
        let start = at(2025, 3, 10, 0);
        let end = at(2025, 3, 12, 23);
        let orders = vec![
            completed(at(2025, 3, 10, 9), 30000),
            completed(at(2025, 3, 10, 18), 20000),
            completed(at(2025, 3, 12, 12), 10000),
        ];

        let report = sales_report(start, end, &orders, &[], &[]);

        assert_eq!(report.total_sales, 60000);
        assert_eq!(report.total_orders, 3);
        assert!((report.average_order_value - 20000.0).abs() < f64::EPSILON);

        // Three days, including the empty 11th.
        assert_eq!(report.sales_by_day.len(), 3);
        assert_eq!(report.sales_by_day[0].sales, 50000);
        assert_eq!(report.sales_by_day[0].orders, 2);
        assert_eq!(report.sales_by_day[1].sales, 0);
        assert_eq!(report.sales_by_day[1].orders, 0);
        assert_eq!(report.sales_by_day[2].sales, 10000);
        assert_eq!(
            report.sales_by_day[1].date,
            chrono::NaiveDate::from_ymd_opt(2025, 3, 11).unwrap()
        );
    }

    #[test]
    fn sales_report_empty_window_has_zero_average() {
        let start = at(2025, 1, 1, 0);
        let report = sales_report(start, start, &[], &[], &[]);
        assert_eq!(report.total_sales, 0);
        assert_eq!(report.total_orders, 0);
        assert_eq!(report.average_order_value, 0.0);
        assert_eq!(report.sales_by_day.len(), 1);
    }

    #[test]
    fn sales_report_truncates_top_lists() {
        let lines: Vec<SoldLineView> = (1..=12)
            .map(|id| sold(id, Size::OneOz, 1, 1000 * id))
            .collect();
        let customers: Vec<CustomerAccountView> =
            (1..=12).map(|id| account(id, 1, 1000)).collect();

        let start = at(2025, 1, 1, 0);
        let report = sales_report(start, start, &[], &lines, &customers);

        assert_eq!(report.top_products.len(), TOP_LIST_LEN);
        assert_eq!(report.top_customers.len(), TOP_LIST_LEN);
        // Products still ranked by revenue after truncation.
        assert_eq!(report.top_products[0].product_id, 12);
    }

    #[test]
    fn customer_analytics_averages_lifetime_spend() {
        let rows = vec![account(1, 4, 100000), account(2, 0, 0)];
        let analytics = customer_analytics(&rows);

        assert!((analytics[0].average_order_value - 25000.0).abs() < f64::EPSILON);
        assert_eq!(analytics[1].average_order_value, 0.0);
        assert_eq!(analytics[0].customer_name, "Customer 1");
    }
}
