//! Catalog endpoints

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};
use shared::models::Product;

use crate::db;
use crate::state::AppState;

use super::ApiResult;

/// GET /products?category=
#[derive(Deserialize)]
pub struct ProductsQuery {
    pub category: Option<String>,
}

pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductsQuery>,
) -> ApiResult<Vec<Product>> {
    let products = match query.category.as_deref() {
        Some(category) => db::products::list_by_category(&state.pool, category).await?,
        None => db::products::list(&state.pool).await?,
    };
    Ok(Json(products))
}

/// GET /products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Product> {
    let product = db::products::find(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ProductNotFound))?;
    Ok(Json(product))
}
