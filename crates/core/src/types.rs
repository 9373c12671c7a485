/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Monetary amounts in whole Colombian pesos. No fractional amounts
/// appear anywhere in the catalog, so integer pesos are exact.
pub type Money = i64;
