//! Repository for the `products` table.

use essenza_core::catalog::Size;
use essenza_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::product::{CreateProduct, Product, UpdateProduct};

/// Column list for products queries.
const COLUMNS: &str = "id, brand, fragrance, category, stock_1oz, stock_2oz, \
    price_1oz, price_2oz, min_stock, is_active, created_at, updated_at";

/// Stock column for a bottle size.
fn stock_column(size: Size) -> &'static str {
    match size {
        Size::OneOz => "stock_1oz",
        Size::TwoOz => "stock_2oz",
    }
}

/// Provides CRUD operations and the guarded stock decrement for products.
pub struct ProductRepo;

impl ProductRepo {
    /// Insert a new product, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateProduct) -> Result<Product, sqlx::Error> {
        let query = format!(
            "INSERT INTO products
                (brand, fragrance, category, stock_1oz, stock_2oz,
                 price_1oz, price_2oz, min_stock)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(&input.brand)
            .bind(&input.fragrance)
            .bind(input.category.as_str())
            .bind(input.stock_1oz)
            .bind(input.stock_2oz)
            .bind(input.price_1oz)
            .bind(input.price_2oz)
            .bind(input.min_stock)
            .fetch_one(pool)
            .await
    }

    /// Find a product by its primary key, active or not.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List products ordered by brand then fragrance. Inactive products
    /// are excluded unless `include_inactive` is set.
    pub async fn list(pool: &PgPool, include_inactive: bool) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM products
             WHERE is_active = TRUE OR $1
             ORDER BY brand, fragrance"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(include_inactive)
            .fetch_all(pool)
            .await
    }

    /// List active products with either size at or below the minimum
    /// stock threshold.
    pub async fn list_low_stock(pool: &PgPool) -> Result<Vec<Product>, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        Self::list_low_stock_on(&mut conn).await
    }

    /// [`Self::list_low_stock`] on an explicit connection (used inside the
    /// alert scan transaction, so the stock read and the alert inserts see
    /// the same snapshot).
    pub async fn list_low_stock_on(conn: &mut PgConnection) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM products
             WHERE is_active = TRUE
               AND (stock_1oz <= min_stock OR stock_2oz <= min_stock)
             ORDER BY brand, fragrance"
        );
        sqlx::query_as::<_, Product>(&query).fetch_all(conn).await
    }

    /// Update a product. Absent fields keep their current value.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProduct,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "UPDATE products SET
                brand = COALESCE($2, brand),
                fragrance = COALESCE($3, fragrance),
                category = COALESCE($4, category),
                stock_1oz = COALESCE($5, stock_1oz),
                stock_2oz = COALESCE($6, stock_2oz),
                price_1oz = COALESCE($7, price_1oz),
                price_2oz = COALESCE($8, price_2oz),
                min_stock = COALESCE($9, min_stock),
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(&input.brand)
            .bind(&input.fragrance)
            .bind(input.category.map(|c| c.as_str()))
            .bind(input.stock_1oz)
            .bind(input.stock_2oz)
            .bind(input.price_1oz)
            .bind(input.price_2oz)
            .bind(input.min_stock)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a product. Returns `true` if a row was deactivated.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE products SET is_active = FALSE, updated_at = now()
             WHERE id = $1 AND is_active = TRUE",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Load an active product with a row lock, for use inside the order
    /// placement transaction. Later stock reads on the row are then
    /// serialized against concurrent placements.
    pub async fn find_active_for_update(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM products WHERE id = $1 AND is_active = TRUE FOR UPDATE");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Guarded stock decrement: subtracts `quantity` from the size's
    /// counter only if enough stock remains. Returns `false` (and changes
    /// nothing) when stock is insufficient.
    pub async fn decrement_stock(
        conn: &mut PgConnection,
        id: DbId,
        size: Size,
        quantity: i32,
    ) -> Result<bool, sqlx::Error> {
        let column = stock_column(size);
        let query = format!(
            "UPDATE products SET {column} = {column} - $2, updated_at = now()
             WHERE id = $1 AND {column} >= $2"
        );
        let result = sqlx::query(&query)
            .bind(id)
            .bind(quantity)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
