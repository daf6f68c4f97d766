//! Cart Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One cart line as the checkout engine sees it
///
/// Produced by joining `cart_items` against `products`; `subtotal` is
/// `unit_price * quantity`, derived in the query. Checkout sums it, it
/// never re-derives it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CartLine {
    pub product_id: i64,
    pub name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
}

/// Cart contents with the running subtotal (API view)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartView {
    pub lines: Vec<CartLine>,
    pub subtotal: Decimal,
}
