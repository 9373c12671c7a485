//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//!
//! Enum-valued columns are stored as TEXT and decoded through the
//! `essenza-core` enums via `#[sqlx(try_from = "String")]`.

pub mod alert;
pub mod customer;
pub mod order;
pub mod product;
