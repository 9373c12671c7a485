//! Pure domain types and logic for the Essenza point-of-sale backend.
//!
//! No I/O lives here: the catalog/order/stats modules operate on plain
//! values so both the repository layer (`essenza-db`) and unit tests can
//! drive them directly.

pub mod catalog;
pub mod error;
pub mod order;
pub mod stats;
pub mod types;
