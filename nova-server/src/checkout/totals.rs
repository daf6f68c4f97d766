//! Order totals computation

use rust_decimal::Decimal;
use shared::models::{CartLine, Coupon};

use crate::money::{non_negative, percent_of, round2};

/// Checkout pricing parameters, injected from configuration
#[derive(Debug, Clone, Copy)]
pub struct PricingConfig {
    /// Tax rate applied to the post-coupon subtotal (0.16 = 16%)
    pub tax_rate: Decimal,
    /// Flat shipping charge per order
    pub shipping_flat: Decimal,
}

/// Priced order totals, rounded to 2 decimal places for persistence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTotals {
    pub subtotal: Decimal,
    pub coupon_discount: Decimal,
    pub subtotal_after_coupon: Decimal,
    pub tax: Decimal,
    pub shipping: Decimal,
    pub total: Decimal,
}

/// Compute priced totals for a cart.
///
/// Pipeline: sum line subtotals, apply the percent coupon, clamp at zero,
/// tax the post-coupon subtotal, add flat shipping. All arithmetic runs at
/// full precision; each field is rounded once at the end for persistence.
/// `discount_percent` of `None` (missing or invalid coupon) prices the order
/// without a discount.
pub fn compute_totals(
    lines: &[CartLine],
    discount_percent: Option<Decimal>,
    pricing: &PricingConfig,
) -> OrderTotals {
    let subtotal: Decimal = lines.iter().map(|l| l.subtotal).sum();

    let coupon_discount = match discount_percent {
        Some(percent) if percent > Decimal::ZERO => percent_of(subtotal, percent),
        _ => Decimal::ZERO,
    };

    let subtotal_after_coupon = non_negative(subtotal - coupon_discount);
    let tax = subtotal_after_coupon * pricing.tax_rate;
    let total = subtotal_after_coupon + tax + pricing.shipping_flat;

    OrderTotals {
        subtotal: round2(subtotal),
        coupon_discount: round2(coupon_discount),
        subtotal_after_coupon: round2(subtotal_after_coupon),
        tax: round2(tax),
        shipping: round2(pricing.shipping_flat),
        total: round2(total),
    }
}

/// Code to redeem at persistence time. Coupons are single-use, but only a
/// coupon that actually discounted the order is consumed; a zero discount
/// (or no coupon) leaves it untouched.
pub fn code_to_consume(coupon: Option<&Coupon>, coupon_discount: Decimal) -> Option<&str> {
    coupon
        .filter(|_| coupon_discount > Decimal::ZERO)
        .map(|c| c.code.as_str())
}
