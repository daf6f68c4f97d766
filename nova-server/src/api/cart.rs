//! Cart endpoints

use axum::extract::{Path, State};
use axum::{Extension, Json};
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};
use shared::models::CartView;

use crate::auth::UserIdentity;
use crate::db;
use crate::state::AppState;

use super::ApiResult;

async fn cart_view(state: &AppState, user_id: i64) -> Result<CartView, sqlx::Error> {
    let lines = db::cart::lines_for_user(&state.pool, user_id).await?;
    let subtotal: Decimal = lines.iter().map(|l| l.subtotal).sum();
    Ok(CartView { lines, subtotal })
}

/// GET /cart
pub async fn view_cart(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
) -> ApiResult<CartView> {
    Ok(Json(cart_view(&state, identity.user_id).await?))
}

/// POST /cart/items
#[derive(Deserialize)]
pub struct AddItemRequest {
    #[serde(rename = "producto_id")]
    pub product_id: i64,
    #[serde(rename = "cantidad")]
    pub quantity: i32,
}

pub async fn add_item(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Json(req): Json<AddItemRequest>,
) -> ApiResult<CartView> {
    if req.quantity <= 0 {
        return Err(AppError::new(ErrorCode::CartQuantityInvalid).into());
    }

    let product = db::products::find(&state.pool, req.product_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ProductNotFound))?;

    if product.stock < req.quantity {
        return Err(AppError::insufficient_stock(&product.name).into());
    }

    db::cart::add_item(&state.pool, identity.user_id, req.product_id, req.quantity).await?;

    Ok(Json(cart_view(&state, identity.user_id).await?))
}

/// PUT /cart/items/{product_id}
#[derive(Deserialize)]
pub struct SetQuantityRequest {
    #[serde(rename = "cantidad")]
    pub quantity: i32,
}

pub async fn set_quantity(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(product_id): Path<i64>,
    Json(req): Json<SetQuantityRequest>,
) -> ApiResult<CartView> {
    if req.quantity <= 0 {
        return Err(AppError::new(ErrorCode::CartQuantityInvalid).into());
    }

    if !db::cart::set_quantity(&state.pool, identity.user_id, product_id, req.quantity).await? {
        return Err(AppError::new(ErrorCode::CartItemNotFound).into());
    }

    Ok(Json(cart_view(&state, identity.user_id).await?))
}

/// DELETE /cart/items/{product_id}
pub async fn remove_item(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(product_id): Path<i64>,
) -> ApiResult<CartView> {
    if !db::cart::remove_item(&state.pool, identity.user_id, product_id).await? {
        return Err(AppError::new(ErrorCode::CartItemNotFound).into());
    }

    Ok(Json(cart_view(&state, identity.user_id).await?))
}

/// DELETE /cart
pub async fn clear_cart(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
) -> ApiResult<CartView> {
    db::cart::clear(&state.pool, identity.user_id).await?;
    Ok(Json(CartView {
        lines: Vec::new(),
        subtotal: Decimal::ZERO,
    }))
}
