//! Data models
//!
//! Shared between the server and API clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (PostgreSQL BIGSERIAL). Monetary fields are
//! `rust_decimal::Decimal` and serialize as 2-decimal strings.

pub mod cart;
pub mod coupon;
pub mod mail;
pub mod order;
pub mod product;
pub mod user;

// Re-exports
pub use cart::*;
pub use coupon::*;
pub use mail::*;
pub use order::*;
pub use product::*;
pub use user::*;
