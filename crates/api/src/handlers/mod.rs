//! HTTP handlers, one module per resource.

pub mod alerts;
pub mod customers;
pub mod orders;
pub mod products;
pub mod reports;
