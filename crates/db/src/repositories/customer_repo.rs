//! Repository for the `customers` table.

use essenza_core::types::{DbId, Money};
use sqlx::{PgConnection, PgPool};

use crate::models::customer::{CreateCustomer, Customer, UpdateCustomer};

/// Column list for customers queries.
const COLUMNS: &str = "id, name, phone, email, address, notes, total_orders, \
    total_spent, is_vip, last_order_at, created_at, updated_at";

/// Provides CRUD operations and the aggregate-stat increment for customers.
pub struct CustomerRepo;

impl CustomerRepo {
    /// Insert a new customer, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateCustomer) -> Result<Customer, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        Self::create_on(&mut conn, input).await
    }

    /// Insert a new customer on an explicit connection (used inside the
    /// order placement transaction).
    pub async fn create_on(
        conn: &mut PgConnection,
        input: &CreateCustomer,
    ) -> Result<Customer, sqlx::Error> {
        let query = format!(
            "INSERT INTO customers (name, phone, email, address, notes, is_vip)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Customer>(&query)
            .bind(&input.name)
            .bind(&input.phone)
            .bind(&input.email)
            .bind(&input.address)
            .bind(&input.notes)
            .bind(input.is_vip)
            .fetch_one(conn)
            .await
    }

    /// Find a customer by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Customer>, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        Self::find_by_id_on(&mut conn, id).await
    }

    /// [`Self::find_by_id`] on an explicit connection.
    pub async fn find_by_id_on(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Customer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM customers WHERE id = $1");
        sqlx::query_as::<_, Customer>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Find the earliest-created customer with a matching phone number.
    pub async fn find_by_phone(
        pool: &PgPool,
        phone: &str,
    ) -> Result<Option<Customer>, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        Self::find_by_phone_on(&mut conn, phone).await
    }

    /// [`Self::find_by_phone`] on an explicit connection.
    pub async fn find_by_phone_on(
        conn: &mut PgConnection,
        phone: &str,
    ) -> Result<Option<Customer>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM customers WHERE phone = $1 ORDER BY created_at LIMIT 1"
        );
        sqlx::query_as::<_, Customer>(&query)
            .bind(phone)
            .fetch_optional(conn)
            .await
    }

    /// List customers, biggest spenders first. Optionally restrict to VIPs.
    pub async fn list(pool: &PgPool, vip_only: bool) -> Result<Vec<Customer>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM customers
             WHERE is_vip = TRUE OR NOT $1
             ORDER BY total_spent DESC, created_at"
        );
        sqlx::query_as::<_, Customer>(&query)
            .bind(vip_only)
            .fetch_all(pool)
            .await
    }

    /// Update a customer's identity/contact fields. Absent fields keep
    /// their current value. Aggregates are not updatable here.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCustomer,
    ) -> Result<Option<Customer>, sqlx::Error> {
        let query = format!(
            "UPDATE customers SET
                name = COALESCE($2, name),
                phone = COALESCE($3, phone),
                email = COALESCE($4, email),
                address = COALESCE($5, address),
                notes = COALESCE($6, notes),
                is_vip = COALESCE($7, is_vip),
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Customer>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.phone)
            .bind(&input.email)
            .bind(&input.address)
            .bind(&input.notes)
            .bind(input.is_vip)
            .fetch_optional(pool)
            .await
    }

    /// Accrue one order and its total onto a customer, stamping the
    /// last-order timestamp. Only the order placement transaction calls
    /// this. Returns `false` if the customer does not exist.
    pub async fn increment_stats(
        conn: &mut PgConnection,
        id: DbId,
        order_total: Money,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE customers SET
                total_orders = total_orders + 1,
                total_spent = total_spent + $2,
                last_order_at = now(),
                updated_at = now()
             WHERE id = $1",
        )
        .bind(id)
        .bind(order_total)
        .execute(conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
