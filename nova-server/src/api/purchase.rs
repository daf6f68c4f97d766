//! Checkout endpoints: process an order, then render and email its receipt

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};
use shared::models::{DeliveryStatus, MailInfo};

use crate::auth::UserIdentity;
use crate::checkout::{CustomerForm, code_to_consume, compute_totals};
use crate::db;
use crate::db::orders::NewOrder;
use crate::error::ServiceError;
use crate::receipt::{ReceiptRenderer, pdf};
use crate::state::AppState;

#[derive(Serialize)]
pub struct ProcessResponse {
    pub success: bool,
    #[serde(rename = "mensaje")]
    pub message: String,
    #[serde(rename = "orderId")]
    pub order_id: i64,
    pub total: Decimal,
}

/// POST /purchase/process
///
/// Validates the form, prices the cart and persists the order in a single
/// transaction. The receipt is not rendered here; clients follow up with
/// `/purchase/finalize`.
pub async fn process(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Json(form): Json<CustomerForm>,
) -> Result<(StatusCode, Json<ProcessResponse>), ServiceError> {
    form.validate()?;

    let lines = db::cart::lines_for_user(&state.pool, identity.user_id).await?;
    if lines.is_empty() {
        return Err(AppError::cart_empty().into());
    }

    // Advisory pre-check; the transaction re-verifies with a conditional
    // decrement, so a race here only changes which error path fires
    for line in &lines {
        if !db::products::available(&state.pool, line.product_id, line.quantity).await? {
            return Err(AppError::insufficient_stock(&line.name).into());
        }
    }

    let coupon = match form.coupon_code() {
        Some(code) => db::coupons::validate(&state.pool, code).await?,
        None => None,
    };

    let totals = compute_totals(
        &lines,
        coupon.as_ref().map(|c| c.discount_percent),
        &state.pricing,
    );

    let consumed_code = code_to_consume(coupon.as_ref(), totals.coupon_discount);

    let order_id = db::orders::create(
        &state.pool,
        &NewOrder {
            user_id: identity.user_id,
            customer_name: form.customer_name.trim(),
            address: form.address.trim(),
            city: form.city.trim(),
            postal_code: form.postal_code.trim(),
            phone: form.phone.trim(),
            country: form.country.trim(),
            payment_method: form.payment_method.trim(),
            subtotal: totals.subtotal,
            coupon_discount: totals.coupon_discount,
            tax: totals.tax,
            shipping: totals.shipping,
            total: totals.total,
        },
        &lines,
        consumed_code,
    )
    .await?;

    tracing::info!(order_id, user_id = identity.user_id, total = %totals.total, "Order created");

    Ok((
        StatusCode::CREATED,
        Json(ProcessResponse {
            success: true,
            message: "Purchase processed successfully".into(),
            order_id,
            total: totals.total,
        }),
    ))
}

#[derive(Deserialize)]
pub struct FinalizeRequest {
    #[serde(rename = "orderId")]
    pub order_id: i64,
    #[serde(default)]
    pub resend: bool,
}

#[derive(Serialize)]
pub struct FinalizeResponse {
    pub success: bool,
    #[serde(rename = "mensaje")]
    pub message: String,
    #[serde(rename = "mailInfo", skip_serializing_if = "Option::is_none")]
    pub mail_info: Option<MailInfo>,
}

/// POST /purchase/finalize
///
/// Renders the order receipt to PDF, writes a durable copy and emails it to
/// the customer. Idempotent: an already-delivered order is a no-op unless
/// `resend` is set. A mail failure leaves the order in `rendered` state and
/// reports the failure without losing the order.
pub async fn finalize(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Json(req): Json<FinalizeRequest>,
) -> Result<Response, ServiceError> {
    let order = db::orders::find_for_user(&state.pool, req.order_id, identity.user_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;

    if !order.order.delivery_status.should_dispatch(req.resend) {
        return Ok(Json(FinalizeResponse {
            success: true,
            message: "Receipt already delivered".into(),
            mail_info: None,
        })
        .into_response());
    }

    let user = db::users::find_by_id(&state.pool, identity.user_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;

    // The render must fully succeed before anything is sent
    let ops = ReceiptRenderer::new(&state.company).render(&order, Utc::now());
    let bytes = pdf::to_bytes(&ops).map_err(ServiceError::Render)?;

    let copy_path = state
        .receipts_dir
        .join(format!("nota_orden_{}.pdf", req.order_id));
    tokio::fs::write(&copy_path, &bytes)
        .await
        .map_err(|e| ServiceError::Render(Box::new(e)))?;

    match state
        .mailer
        .send_order_receipt(&user.email, &order.order.customer_name, req.order_id, bytes)
        .await
    {
        Ok(info) => {
            db::orders::set_delivery_status(&state.pool, req.order_id, DeliveryStatus::Delivered)
                .await?;
            tracing::info!(order_id = req.order_id, "Receipt delivered");

            Ok(Json(FinalizeResponse {
                success: true,
                message: "Receipt delivered successfully".into(),
                mail_info: Some(info),
            })
            .into_response())
        }
        Err(e) => {
            let err = ServiceError::Mail(e);
            tracing::error!(order_id = req.order_id, error = %err, "Receipt mail failed");
            db::orders::set_delivery_status(&state.pool, req.order_id, DeliveryStatus::Rendered)
                .await?;

            Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(FinalizeResponse {
                    success: false,
                    message: "order finalized but email delivery failed".into(),
                    mail_info: None,
                }),
            )
                .into_response())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_response_wire_shape() {
        let json = serde_json::to_value(ProcessResponse {
            success: true,
            message: "Purchase processed successfully".into(),
            order_id: 7,
            total: "358.80".parse().unwrap(),
        })
        .unwrap();

        assert_eq!(json["orderId"], 7);
        assert_eq!(json["mensaje"], "Purchase processed successfully");
        assert_eq!(json["total"], "358.80");
        assert_eq!(json["success"], true);
    }

    #[test]
    fn test_finalize_response_omits_absent_mail_info() {
        let json = serde_json::to_value(FinalizeResponse {
            success: false,
            message: "order finalized but email delivery failed".into(),
            mail_info: None,
        })
        .unwrap();

        assert_eq!(json["mensaje"], "order finalized but email delivery failed");
        assert!(json.get("mailInfo").is_none());
    }

    #[test]
    fn test_finalize_request_resend_defaults_off() {
        let req: FinalizeRequest =
            serde_json::from_value(serde_json::json!({ "orderId": 12 })).unwrap();
        assert_eq!(req.order_id, 12);
        assert!(!req.resend);
    }
}
