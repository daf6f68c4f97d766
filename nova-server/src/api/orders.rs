//! Order history endpoints

use axum::extract::{Path, State};
use axum::{Extension, Json};
use shared::error::{AppError, ErrorCode};
use shared::models::{Order, OrderWithLines};

use crate::auth::UserIdentity;
use crate::db;
use crate::state::AppState;

use super::ApiResult;

/// GET /orders — the caller's orders, newest first
pub async fn list_orders(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
) -> ApiResult<Vec<Order>> {
    let orders = db::orders::list_for_user(&state.pool, identity.user_id).await?;
    Ok(Json(orders))
}

/// GET /orders/{id} — header with lines, ownership enforced
pub async fn get_order(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(id): Path<i64>,
) -> ApiResult<OrderWithLines> {
    let order = db::orders::find_for_user(&state.pool, id, identity.user_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;
    Ok(Json(order))
}
