use shared::models::Coupon;
use sqlx::{PgConnection, PgPool};

/// Look up an active coupon by code
pub async fn validate(pool: &PgPool, code: &str) -> Result<Option<Coupon>, sqlx::Error> {
    sqlx::query_as::<_, Coupon>(
        "SELECT id, code, discount_percent, active
         FROM coupons WHERE code = $1 AND active",
    )
    .bind(code)
    .fetch_optional(pool)
    .await
}

/// Consume a redeemed coupon: delete the row, falling back to deactivation
/// if the delete reports zero rows. Runs inside the checkout transaction.
pub async fn consume(conn: &mut PgConnection, code: &str) -> Result<(), sqlx::Error> {
    let deleted = sqlx::query("DELETE FROM coupons WHERE code = $1")
        .bind(code)
        .execute(&mut *conn)
        .await?;

    if deleted.rows_affected() == 0 {
        sqlx::query("UPDATE coupons SET active = FALSE WHERE code = $1")
            .bind(code)
            .execute(conn)
            .await?;
    }

    Ok(())
}
