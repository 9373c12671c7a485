//! Repository for the `orders` / `order_lines` tables, including the
//! order placement transaction.

use std::collections::HashMap;

use essenza_core::catalog::Size;
use essenza_core::error::CoreError;
use essenza_core::order::{self, OrderStatus, PricedLine};
use essenza_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::customer::{CreateCustomer, Customer};
use crate::models::order::{Order, OrderLine, OrderWithLines, PlaceOrder};
use crate::repositories::{CustomerRepo, ProductRepo};

/// Column list for orders queries.
const COLUMNS: &str = "id, customer_id, customer_name, customer_phone, subtotal, \
    total, item_count, status, notes, completed_at, created_at, updated_at";

/// Column list for order_lines queries.
const LINE_COLUMNS: &str = "id, order_id, position, product_id, product_name, \
    brand, fragrance, size, quantity, unit_price, line_total, notes";

/// Failure modes of [`OrderRepo::place`] and [`OrderRepo::set_status`].
///
/// Domain rejections (validation, insufficient stock, unknown entities,
/// illegal transitions) are separated from storage failures so the API
/// layer can map each to the right status code.
#[derive(Debug, thiserror::Error)]
pub enum PlaceOrderError {
    #[error(transparent)]
    Domain(#[from] CoreError),

    #[error(transparent)]
    Db(#[from] sqlx::Error),
}

/// Provides order placement, lookup, and the status state machine.
pub struct OrderRepo;

impl OrderRepo {
    /// Place an order: resolve the customer, price and validate every
    /// line, persist the order with its lines, decrement stock, and
    /// accrue the customer's aggregates.
    ///
    /// Everything runs in one transaction; any failure rolls the whole
    /// placement back, so no partial order is ever observable. Product
    /// rows are locked up front (`SELECT ... FOR UPDATE`), which
    /// serializes concurrent placements touching the same product.
    pub async fn place(pool: &PgPool, input: &PlaceOrder) -> Result<OrderWithLines, PlaceOrderError> {
        // Reject before touching the database.
        let quantities: Vec<i32> = input.lines.iter().map(|l| l.quantity).collect();
        order::validate_line_quantities(&quantities)?;
        if input.customer_id.is_none() {
            order::validate_customer_name(input.customer_name.as_deref().unwrap_or(""))?;
        }

        let mut tx = pool.begin().await?;

        let customer = Self::resolve_customer(&mut tx, input).await?;

        // Lock each referenced product once and track a running stock
        // snapshot, so several lines for the same product+size are
        // checked against what earlier lines already claimed.
        let mut products = HashMap::new();
        let mut remaining: HashMap<(DbId, Size), i32> = HashMap::new();
        let mut priced: Vec<PricedLine> = Vec::with_capacity(input.lines.len());

        for line in &input.lines {
            if !products.contains_key(&line.product_id) {
                let product = ProductRepo::find_active_for_update(&mut tx, line.product_id)
                    .await?
                    .ok_or(CoreError::NotFound {
                        entity: "Product",
                        id: line.product_id,
                    })?;
                remaining.insert((product.id, Size::OneOz), product.stock_1oz);
                remaining.insert((product.id, Size::TwoOz), product.stock_2oz);
                products.insert(product.id, product);
            }
            let product = &products[&line.product_id];

            let available = remaining
                .get_mut(&(line.product_id, line.size))
                .expect("stock snapshot populated above");
            if line.quantity > *available {
                return Err(CoreError::InsufficientStock {
                    product_id: line.product_id,
                    size: line.size,
                    requested: line.quantity,
                    available: *available,
                }
                .into());
            }
            *available -= line.quantity;

            let unit_price = product.price_for(line.size);
            priced.push(PricedLine {
                product_id: product.id,
                product_name: order::product_display_name(&product.brand, &product.fragrance),
                brand: product.brand.clone(),
                fragrance: product.fragrance.clone(),
                size: line.size,
                quantity: line.quantity,
                unit_price,
                line_total: order::line_total(line.quantity, unit_price),
                notes: line.notes.clone(),
            });
        }

        let totals = order::order_totals(&priced);

        let insert_order = format!(
            "INSERT INTO orders
                (customer_id, customer_name, customer_phone, subtotal, total,
                 item_count, status, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        let order_row = sqlx::query_as::<_, Order>(&insert_order)
            .bind(customer.id)
            .bind(&customer.name)
            .bind(&customer.phone)
            .bind(totals.subtotal)
            .bind(totals.total)
            .bind(totals.item_count)
            .bind(OrderStatus::Pending.as_str())
            .bind(&input.notes)
            .fetch_one(&mut *tx)
            .await?;

        let insert_line = format!(
            "INSERT INTO order_lines
                (order_id, position, product_id, product_name, brand, fragrance,
                 size, quantity, unit_price, line_total, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {LINE_COLUMNS}"
        );
        let mut lines = Vec::with_capacity(priced.len());
        for (position, line) in priced.iter().enumerate() {
            let row = sqlx::query_as::<_, OrderLine>(&insert_line)
                .bind(order_row.id)
                .bind(position as i32)
                .bind(line.product_id)
                .bind(&line.product_name)
                .bind(&line.brand)
                .bind(&line.fragrance)
                .bind(line.size.as_str())
                .bind(line.quantity)
                .bind(line.unit_price)
                .bind(line.line_total)
                .bind(&line.notes)
                .fetch_one(&mut *tx)
                .await?;
            lines.push(row);
        }

        for line in &priced {
            let decremented =
                ProductRepo::decrement_stock(&mut tx, line.product_id, line.size, line.quantity)
                    .await?;
            if !decremented {
                // The snapshot check above makes this unreachable while
                // the row lock is held; fail loudly if it ever trips.
                return Err(CoreError::InsufficientStock {
                    product_id: line.product_id,
                    size: line.size,
                    requested: line.quantity,
                    available: 0,
                }
                .into());
            }
        }

        CustomerRepo::increment_stats(&mut tx, customer.id, totals.total).await?;

        tx.commit().await?;

        tracing::info!(
            order_id = order_row.id,
            customer_id = customer.id,
            total = totals.total,
            items = totals.item_count,
            "Order placed"
        );

        Ok(OrderWithLines {
            order: order_row,
            lines,
        })
    }

    /// Resolve the ordering customer: by id, then by phone match, then by
    /// creating a new record from the supplied name/phone.
    async fn resolve_customer(
        conn: &mut PgConnection,
        input: &PlaceOrder,
    ) -> Result<Customer, PlaceOrderError> {
        if let Some(id) = input.customer_id {
            return CustomerRepo::find_by_id_on(conn, id)
                .await?
                .ok_or(CoreError::NotFound {
                    entity: "Customer",
                    id,
                })
                .map_err(Into::into);
        }

        let phone = input
            .customer_phone
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty());

        if let Some(phone) = phone {
            if let Some(existing) = CustomerRepo::find_by_phone_on(conn, phone).await? {
                return Ok(existing);
            }
        }

        let name = input
            .customer_name
            .as_deref()
            .map(str::trim)
            .unwrap_or_default();
        let created = CustomerRepo::create_on(
            conn,
            &CreateCustomer {
                name: name.to_string(),
                phone: phone.map(str::to_string),
                ..CreateCustomer::default()
            },
        )
        .await?;
        Ok(created)
    }

    /// Fetch an order together with its lines.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<OrderWithLines>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM orders WHERE id = $1");
        let Some(order) = sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?
        else {
            return Ok(None);
        };

        let lines = Self::lines_for(pool, id).await?;
        Ok(Some(OrderWithLines { order, lines }))
    }

    /// Lines of one order, in entry order.
    pub async fn lines_for(pool: &PgPool, order_id: DbId) -> Result<Vec<OrderLine>, sqlx::Error> {
        let query = format!(
            "SELECT {LINE_COLUMNS} FROM order_lines WHERE order_id = $1 ORDER BY position"
        );
        sqlx::query_as::<_, OrderLine>(&query)
            .bind(order_id)
            .fetch_all(pool)
            .await
    }

    /// List orders, newest first, optionally filtered by status.
    pub async fn list(
        pool: &PgPool,
        status: Option<OrderStatus>,
    ) -> Result<Vec<Order>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM orders
             WHERE $1::text IS NULL OR status = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(status.map(OrderStatus::as_str))
            .fetch_all(pool)
            .await
    }

    /// List one customer's orders, newest first.
    pub async fn list_by_customer(
        pool: &PgPool,
        customer_id: DbId,
    ) -> Result<Vec<Order>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM orders WHERE customer_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(customer_id)
            .fetch_all(pool)
            .await
    }

    /// Apply a status transition. Only `pending` orders move, and only to
    /// `completed` (stamping `completed_at`) or `cancelled`; anything else
    /// is a conflict.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        target: OrderStatus,
    ) -> Result<Order, PlaceOrderError> {
        let mut tx = pool.begin().await?;

        let query = format!("SELECT {COLUMNS} FROM orders WHERE id = $1 FOR UPDATE");
        let current = sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Order",
                id,
            })?;

        if !current.status.can_transition(target) {
            return Err(CoreError::Conflict(format!(
                "Order {id} cannot move from {} to {}",
                current.status, target
            ))
            .into());
        }

        let update = format!(
            "UPDATE orders SET
                status = $2,
                completed_at = CASE WHEN $2 = 'completed' THEN now() ELSE completed_at END,
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Order>(&update)
            .bind(id)
            .bind(target.as_str())
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(updated)
    }
}
