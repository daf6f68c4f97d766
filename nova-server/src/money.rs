//! Money arithmetic using rust_decimal for precision
//!
//! All monetary math runs on `Decimal`. Rounding to 2 places happens only at
//! stored/display boundaries, never on intermediate values, so repeated
//! operations do not compound rounding error.

use rust_decimal::prelude::*;

/// Rounding precision for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Round a monetary value to 2 decimal places, midpoint away from zero
#[inline]
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Percentage of an amount: `amount * percent / 100`, unrounded
#[inline]
pub fn percent_of(amount: Decimal, percent: Decimal) -> Decimal {
    amount * percent / Decimal::ONE_HUNDRED
}

/// Clamp a value to be non-negative
#[inline]
pub fn non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

/// Format a monetary value for display: `$` prefix, exactly 2 decimal
/// places, comma thousands separators (es-MX grouping)
pub fn format_currency(value: Decimal) -> String {
    let mut rounded = round2(value);
    let negative = rounded.is_sign_negative();
    rounded.set_sign_positive(true);
    rounded.rescale(DECIMAL_PLACES);

    let text = rounded.to_string();
    let (int_part, frac_part) = text.split_once('.').unwrap_or((&text, "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-${grouped}.{frac_part}")
    } else {
        format!("${grouped}.{frac_part}")
    }
}
