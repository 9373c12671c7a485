//! Shared query parameter types for API handlers.
//!
//! Common query structs that appear across multiple handler modules are
//! extracted here to avoid duplication.

use essenza_core::types::Timestamp;
use serde::Deserialize;

/// Query parameters for list endpoints that support an `include_inactive` flag.
#[derive(Debug, Deserialize)]
pub struct IncludeInactiveParams {
    #[serde(default)]
    pub include_inactive: bool,
}

/// Inclusive date range (`?start=...&end=...`, RFC 3339 timestamps).
#[derive(Debug, Deserialize)]
pub struct DateRangeParams {
    pub start: Timestamp,
    pub end: Timestamp,
}
