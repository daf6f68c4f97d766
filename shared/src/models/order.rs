//! Order Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Receipt delivery progress for an order
///
/// `Rendered` means a receipt document was produced but the email did not
/// go out; `Delivered` means the mailer accepted it. Finalize is a no-op
/// once `Delivered` unless the caller asks for a re-send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(
    feature = "db",
    sqlx(type_name = "delivery_status", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    #[default]
    None,
    Rendered,
    Delivered,
}

impl DeliveryStatus {
    /// Get the string name for this status
    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Rendered => "rendered",
            Self::Delivered => "delivered",
        }
    }

    /// Whether a finalize call should render and dispatch the receipt.
    /// Once delivered, only an explicit re-send request dispatches again.
    pub fn should_dispatch(&self, resend: bool) -> bool {
        resend || *self != Self::Delivered
    }
}

/// Persisted order header
///
/// Monetary fields are stored rounded to 2 decimal places. The header is
/// immutable after checkout apart from `delivery_status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub customer_name: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub phone: String,
    pub country: String,
    pub payment_method: String,
    pub subtotal: Decimal,
    pub coupon_discount: Decimal,
    pub tax: Decimal,
    pub shipping: Decimal,
    pub total: Decimal,
    pub delivery_status: DeliveryStatus,
    pub created_at: DateTime<Utc>,
}

/// One order line, created atomically with its header
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderLine {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
}

/// Order header together with its lines (detail view)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderWithLines {
    #[serde(flatten)]
    pub order: Order,
    pub lines: Vec<OrderLine>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delivery_status_serde() {
        assert_eq!(
            serde_json::to_string(&DeliveryStatus::None).unwrap(),
            "\"none\""
        );
        assert_eq!(
            serde_json::to_string(&DeliveryStatus::Rendered).unwrap(),
            "\"rendered\""
        );
        assert_eq!(
            serde_json::to_string(&DeliveryStatus::Delivered).unwrap(),
            "\"delivered\""
        );

        let status: DeliveryStatus = serde_json::from_str("\"delivered\"").unwrap();
        assert_eq!(status, DeliveryStatus::Delivered);
    }

    #[test]
    fn test_delivery_status_default() {
        assert_eq!(DeliveryStatus::default(), DeliveryStatus::None);
        assert_eq!(DeliveryStatus::default().name(), "none");
    }

    #[test]
    fn test_delivered_dispatches_only_on_resend() {
        assert!(!DeliveryStatus::Delivered.should_dispatch(false));
        assert!(DeliveryStatus::Delivered.should_dispatch(true));
    }

    #[test]
    fn test_undelivered_always_dispatches() {
        assert!(DeliveryStatus::None.should_dispatch(false));
        assert!(DeliveryStatus::Rendered.should_dispatch(false));
        assert!(DeliveryStatus::Rendered.should_dispatch(true));
    }
}
