//! Order domain logic: the status state machine, line pricing, and
//! draft-order validation.
//!
//! The repository layer resolves products and prices inside its
//! transaction and feeds the plain values here, so totals and validation
//! stay testable without a database.

use serde::{Deserialize, Serialize};

use crate::catalog::Size;
use crate::error::CoreError;
use crate::types::{DbId, Money};

/// Order lifecycle status.
///
/// `pending` is the initial state. `completed` and `cancelled` are both
/// terminal: no transition leads out of either. `cancelled` is reachable
/// through the generic status update but nothing in the application sets
/// it today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Whether the state machine permits moving from `self` to `target`.
    pub fn can_transition(self, target: OrderStatus) -> bool {
        matches!(
            (self, target),
            (OrderStatus::Pending, OrderStatus::Completed)
                | (OrderStatus::Pending, OrderStatus::Cancelled)
        )
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for OrderStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "completed" => Ok(OrderStatus::Completed),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(CoreError::Validation(format!("Unknown order status: {other}"))),
        }
    }
}

/// A line item after product resolution: quantities validated, unit price
/// copied from the product's size-specific price, line total computed.
#[derive(Debug, Clone, Serialize)]
pub struct PricedLine {
    pub product_id: DbId,
    pub product_name: String,
    pub brand: String,
    pub fragrance: String,
    pub size: Size,
    pub quantity: i32,
    pub unit_price: Money,
    pub line_total: Money,
    pub notes: Option<String>,
}

/// Totals derived from a set of priced lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderTotals {
    pub subtotal: Money,
    pub total: Money,
    pub item_count: i32,
}

/// Display name used wherever the product is denormalized onto another
/// record ("brand - fragrance").
pub fn product_display_name(brand: &str, fragrance: &str) -> String {
    format!("{brand} - {fragrance}")
}

/// Total for a single line.
pub fn line_total(quantity: i32, unit_price: Money) -> Money {
    Money::from(quantity) * unit_price
}

/// Sum priced lines into order totals. Subtotal and total are equal; the
/// store applies no tax or discount.
pub fn order_totals(lines: &[PricedLine]) -> OrderTotals {
    let subtotal: Money = lines.iter().map(|l| l.line_total).sum();
    let item_count: i32 = lines.iter().map(|l| l.quantity).sum();
    OrderTotals {
        subtotal,
        total: subtotal,
        item_count,
    }
}

/// Validate the raw line requests of a draft order before any pricing or
/// stock work happens. Rejects empty orders and non-positive quantities.
pub fn validate_line_quantities(quantities: &[i32]) -> Result<(), CoreError> {
    if quantities.is_empty() {
        return Err(CoreError::EmptyOrder);
    }
    for &qty in quantities {
        if qty <= 0 {
            return Err(CoreError::Validation(format!(
                "Line quantity must be positive, got {qty}"
            )));
        }
    }
    Ok(())
}

/// Validate a customer name supplied for on-the-fly customer creation.
pub fn validate_customer_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation(
            "Customer name must not be empty".to_string(),
        ));
    }
    Ok(())
}
