//! Database access layer

pub mod cart;
pub mod coupons;
pub mod orders;
pub mod products;
pub mod users;
