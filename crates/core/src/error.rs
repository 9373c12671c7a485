use crate::catalog::Size;
use crate::types::{DbId, Money};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Order must contain at least one line item")]
    EmptyOrder,

    #[error(
        "Insufficient stock for product {product_id} ({size}): requested {requested}, available {available}"
    )]
    InsufficientStock {
        product_id: DbId,
        size: Size,
        requested: i32,
        available: i32,
    },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Validation error for a monetary field that must be positive.
    pub fn non_positive_amount(field: &str, value: Money) -> Self {
        CoreError::Validation(format!("{field} must be positive, got {value}"))
    }
}
