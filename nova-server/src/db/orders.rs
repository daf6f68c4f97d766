//! Order persistence: the transactional checkout write and read accessors

use rust_decimal::Decimal;
use shared::error::AppError;
use shared::models::{CartLine, DeliveryStatus, Order, OrderLine, OrderWithLines};
use sqlx::{Acquire, PgPool};

use crate::db::{coupons, products};
use crate::error::{ServiceError, ServiceResult};

const ORDER_COLUMNS: &str = "id, user_id, customer_name, address, city, postal_code, phone, \
     country, payment_method, subtotal, coupon_discount, tax, shipping, total, \
     delivery_status, created_at";

/// Order header fields computed by the checkout engine
pub struct NewOrder<'a> {
    pub user_id: i64,
    pub customer_name: &'a str,
    pub address: &'a str,
    pub city: &'a str,
    pub postal_code: &'a str,
    pub phone: &'a str,
    pub country: &'a str,
    pub payment_method: &'a str,
    pub subtotal: Decimal,
    pub coupon_discount: Decimal,
    pub tax: Decimal,
    pub shipping: Decimal,
    pub total: Decimal,
}

/// Persist a checkout in one transaction: order header, lines, conditional
/// stock decrements, per-category sale records, coupon consumption and cart
/// drain. Nothing commits unless every stock decrement succeeds.
///
/// `coupon_code` is `Some` only when the coupon produced a non-zero discount.
/// Consumption runs in a savepoint: a failed statement aborts a Postgres
/// transaction, so rolling back only the savepoint is what keeps a
/// consumption failure non-fatal to the checkout. The failure is logged and
/// the order still commits.
pub async fn create(
    pool: &PgPool,
    order: &NewOrder<'_>,
    lines: &[CartLine],
    coupon_code: Option<&str>,
) -> ServiceResult<i64> {
    let mut tx = pool.begin().await?;

    let order_id: i64 = sqlx::query_scalar(
        "INSERT INTO orders (user_id, customer_name, address, city, postal_code,
                             phone, country, payment_method, subtotal,
                             coupon_discount, tax, shipping, total)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
         RETURNING id",
    )
    .bind(order.user_id)
    .bind(order.customer_name)
    .bind(order.address)
    .bind(order.city)
    .bind(order.postal_code)
    .bind(order.phone)
    .bind(order.country)
    .bind(order.payment_method)
    .bind(order.subtotal)
    .bind(order.coupon_discount)
    .bind(order.tax)
    .bind(order.shipping)
    .bind(order.total)
    .fetch_one(&mut *tx)
    .await?;

    for line in lines {
        sqlx::query(
            "INSERT INTO order_lines (order_id, product_id, name, quantity, unit_price, subtotal)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(order_id)
        .bind(line.product_id)
        .bind(&line.name)
        .bind(line.quantity)
        .bind(line.unit_price)
        .bind(line.subtotal)
        .execute(&mut *tx)
        .await?;

        // Authoritative availability gate: zero affected rows rolls everything back
        if !products::decrement_stock(&mut *tx, line.product_id, line.quantity).await? {
            return Err(ServiceError::App(AppError::insufficient_stock(&line.name)));
        }

        let category: String = sqlx::query_scalar("SELECT category FROM products WHERE id = $1")
            .bind(line.product_id)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("INSERT INTO sale_records (order_id, category, amount) VALUES ($1, $2, $3)")
            .bind(order_id)
            .bind(&category)
            .bind(line.subtotal)
            .execute(&mut *tx)
            .await?;
    }

    if let Some(code) = coupon_code {
        let mut sp = tx.begin().await?;
        match coupons::consume(&mut *sp, code).await {
            Ok(()) => sp.commit().await?,
            Err(e) => {
                tracing::warn!(code, error = %e, "Coupon consumption failed, continuing checkout");
                sp.rollback().await?;
            }
        }
    }

    sqlx::query("DELETE FROM cart_items WHERE user_id = $1")
        .bind(order.user_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(order_id)
}

/// Fetch an order with its lines, enforcing ownership. Returns `None` both
/// for unknown ids and for orders belonging to another user.
pub async fn find_for_user(
    pool: &PgPool,
    order_id: i64,
    user_id: i64,
) -> Result<Option<OrderWithLines>, sqlx::Error> {
    let header = sqlx::query_as::<_, Order>(&format!(
        "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1 AND user_id = $2"
    ))
    .bind(order_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    let Some(order) = header else {
        return Ok(None);
    };

    let lines = sqlx::query_as::<_, OrderLine>(
        "SELECT id, order_id, product_id, name, quantity, unit_price, subtotal
         FROM order_lines WHERE order_id = $1 ORDER BY id",
    )
    .bind(order_id)
    .fetch_all(pool)
    .await?;

    Ok(Some(OrderWithLines { order, lines }))
}

pub async fn list_for_user(pool: &PgPool, user_id: i64) -> Result<Vec<Order>, sqlx::Error> {
    sqlx::query_as::<_, Order>(&format!(
        "SELECT {ORDER_COLUMNS} FROM orders WHERE user_id = $1 ORDER BY created_at DESC"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn set_delivery_status(
    pool: &PgPool,
    order_id: i64,
    status: DeliveryStatus,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE orders SET delivery_status = $2 WHERE id = $1")
        .bind(order_id)
        .bind(status)
        .execute(pool)
        .await?;
    Ok(())
}
