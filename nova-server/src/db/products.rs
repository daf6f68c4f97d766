use shared::models::Product;
use sqlx::{PgConnection, PgPool};

pub async fn list(pool: &PgPool) -> Result<Vec<Product>, sqlx::Error> {
    sqlx::query_as::<_, Product>(
        "SELECT id, name, description, category, price, stock
         FROM products ORDER BY name",
    )
    .fetch_all(pool)
    .await
}

pub async fn list_by_category(pool: &PgPool, category: &str) -> Result<Vec<Product>, sqlx::Error> {
    sqlx::query_as::<_, Product>(
        "SELECT id, name, description, category, price, stock
         FROM products WHERE category = $1 ORDER BY name",
    )
    .bind(category)
    .fetch_all(pool)
    .await
}

pub async fn find(pool: &PgPool, id: i64) -> Result<Option<Product>, sqlx::Error> {
    sqlx::query_as::<_, Product>(
        "SELECT id, name, description, category, price, stock
         FROM products WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Pre-checkout availability read. Advisory only: the conditional decrement
/// inside the checkout transaction is the authoritative gate.
pub async fn available(pool: &PgPool, product_id: i64, quantity: i32) -> Result<bool, sqlx::Error> {
    let ok: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM products WHERE id = $1 AND stock >= $2)")
            .bind(product_id)
            .bind(quantity)
            .fetch_one(pool)
            .await?;
    Ok(ok)
}

/// Conditional stock decrement. Returns false when stock would go negative;
/// zero affected rows means the caller must roll back.
pub async fn decrement_stock(
    conn: &mut PgConnection,
    product_id: i64,
    quantity: i32,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE products SET stock = stock - $2 WHERE id = $1 AND stock >= $2")
        .bind(product_id)
        .bind(quantity)
        .execute(conn)
        .await?;
    Ok(result.rows_affected() > 0)
}
