//! Coupon check endpoint

use axum::extract::State;
use axum::Json;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};

use crate::db;
use crate::state::AppState;

use super::ApiResult;

/// POST /coupons/validate
#[derive(Deserialize)]
pub struct ValidateRequest {
    #[serde(rename = "codigo")]
    pub code: String,
}

#[derive(Serialize)]
pub struct CouponCheck {
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(rename = "descuento_porcentaje")]
    pub discount_percent: Decimal,
}

pub async fn validate(
    State(state): State<AppState>,
    Json(req): Json<ValidateRequest>,
) -> ApiResult<CouponCheck> {
    let code = req.code.trim();
    let coupon = db::coupons::validate(&state.pool, code)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::CouponInvalid))?;

    Ok(Json(CouponCheck {
        code: coupon.code,
        discount_percent: coupon.discount_percent,
    }))
}
