//! Coupon Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Discount coupon
///
/// `discount_percent` is in [0, 100]. A coupon is redeemable while it
/// exists and `active` is true; redemption consumes it permanently.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Coupon {
    pub id: i64,
    pub code: String,
    pub discount_percent: Decimal,
    pub active: bool,
}
