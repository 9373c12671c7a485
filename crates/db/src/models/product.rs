//! Product entity model and DTOs.

use essenza_core::catalog::{Category, Size};
use essenza_core::types::{DbId, Money, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `products` table.
///
/// Each product is sold in two fixed bottle sizes with independent stock
/// counters and prices. `is_active` is the soft-delete marker.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Product {
    pub id: DbId,
    pub brand: String,
    pub fragrance: String,
    #[sqlx(try_from = "String")]
    pub category: Category,
    pub stock_1oz: i32,
    pub stock_2oz: i32,
    pub price_1oz: Money,
    pub price_2oz: Money,
    pub min_stock: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Product {
    /// Current stock for one of the two sizes.
    pub fn stock_for(&self, size: Size) -> i32 {
        match size {
            Size::OneOz => self.stock_1oz,
            Size::TwoOz => self.stock_2oz,
        }
    }

    /// Current unit price for one of the two sizes.
    pub fn price_for(&self, size: Size) -> Money {
        match size {
            Size::OneOz => self.price_1oz,
            Size::TwoOz => self.price_2oz,
        }
    }
}

/// DTO for creating a new product.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProduct {
    pub brand: String,
    pub fragrance: String,
    pub category: Category,
    #[serde(default)]
    pub stock_1oz: i32,
    #[serde(default)]
    pub stock_2oz: i32,
    pub price_1oz: Money,
    pub price_2oz: Money,
    #[serde(default)]
    pub min_stock: i32,
}

/// DTO for updating a product. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProduct {
    pub brand: Option<String>,
    pub fragrance: Option<String>,
    pub category: Option<Category>,
    pub stock_1oz: Option<i32>,
    pub stock_2oz: Option<i32>,
    pub price_1oz: Option<Money>,
    pub price_2oz: Option<Money>,
    pub min_stock: Option<i32>,
}
