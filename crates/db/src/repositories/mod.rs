//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Steps that participate in
//! the order placement transaction take `&mut PgConnection` instead so
//! they can run on the transaction's connection.

pub mod alert_repo;
pub mod customer_repo;
pub mod order_repo;
pub mod product_repo;
pub mod report_repo;

pub use alert_repo::AlertRepo;
pub use customer_repo::CustomerRepo;
pub use order_repo::{OrderRepo, PlaceOrderError};
pub use product_repo::ProductRepo;
pub use report_repo::ReportRepo;
