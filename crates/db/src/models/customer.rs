//! Customer entity model and DTOs.

use essenza_core::types::{DbId, Money, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `customers` table.
///
/// `total_orders` / `total_spent` are cumulative aggregates that only the
/// order placement transaction increments. `is_vip` is set by staff; it is
/// never derived.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Customer {
    pub id: DbId,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
    pub total_orders: i32,
    pub total_spent: Money,
    pub is_vip: bool,
    pub last_order_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new customer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateCustomer {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
    #[serde(default)]
    pub is_vip: bool,
}

/// DTO for updating a customer. Absent fields are left unchanged.
///
/// Deliberately excludes the aggregate fields: those move only through
/// `CustomerRepo::increment_stats` inside an order placement.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCustomer {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
    pub is_vip: Option<bool>,
}
