//! Order entity models and DTOs.

use essenza_core::catalog::Size;
use essenza_core::order::OrderStatus;
use essenza_core::types::{DbId, Money, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `orders` table.
///
/// `subtotal` and `total` are always equal (no tax or discount logic);
/// `item_count` is the sum of line quantities. `completed_at` is set only
/// on the transition to `completed`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Order {
    pub id: DbId,
    pub customer_id: DbId,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub subtotal: Money,
    pub total: Money,
    pub item_count: i32,
    #[sqlx(try_from = "String")]
    pub status: OrderStatus,
    pub notes: Option<String>,
    pub completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `order_lines` table. `position` preserves the order
/// lines were entered in.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OrderLine {
    pub id: DbId,
    pub order_id: DbId,
    pub position: i32,
    pub product_id: DbId,
    pub product_name: String,
    pub brand: String,
    pub fragrance: String,
    #[sqlx(try_from = "String")]
    pub size: Size,
    pub quantity: i32,
    pub unit_price: Money,
    pub line_total: Money,
    pub notes: Option<String>,
}

/// An order together with its lines, as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct OrderWithLines {
    #[serde(flatten)]
    pub order: Order,
    pub lines: Vec<OrderLine>,
}

/// One requested line of a new order.
#[derive(Debug, Clone, Deserialize)]
pub struct LineRequest {
    pub product_id: DbId,
    pub size: Size,
    pub quantity: i32,
    pub notes: Option<String>,
}

/// Request body for placing an order.
///
/// The customer is either an existing `customer_id`, or a raw
/// `customer_name` / `customer_phone` pair: a phone match reuses the
/// existing customer, otherwise a new one is created.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceOrder {
    pub customer_id: Option<DbId>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub lines: Vec<LineRequest>,
    pub notes: Option<String>,
}

/// Request body for an order status update.
#[derive(Debug, Clone, Deserialize)]
pub struct SetOrderStatus {
    pub status: OrderStatus,
}
