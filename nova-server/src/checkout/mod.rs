//! Checkout engine: customer form validation and pure totals computation
//!
//! Persistence lives in `db::orders::create`; everything here is side-effect
//! free so the pricing rules can be tested without a database.

mod form;
mod totals;

pub use form::CustomerForm;
pub use totals::{OrderTotals, PricingConfig, code_to_consume, compute_totals};
