//! API routes for nova-server

pub mod auth;
pub mod cart;
pub mod coupons;
pub mod health;
pub mod orders;
pub mod products;
pub mod purchase;

use axum::routing::{get, post, put};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub type ApiResult<T> = Result<axum::Json<T>, crate::error::ServiceError>;

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    // Open surface: health, registration/login and the product catalog
    let public = Router::new()
        .route("/health", get(health::health_check))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/products", get(products::list_products))
        .route("/products/{id}", get(products::get_product));

    // Everything else requires a bearer JWT
    let protected = Router::new()
        .route("/auth/me", get(auth::me))
        .route("/cart", get(cart::view_cart).delete(cart::clear_cart))
        .route("/cart/items", post(cart::add_item))
        .route(
            "/cart/items/{product_id}",
            put(cart::set_quantity).delete(cart::remove_item),
        )
        .route("/coupons/validate", post(coupons::validate))
        .route("/orders", get(orders::list_orders))
        .route("/orders/{id}", get(orders::get_order))
        .route("/purchase/process", post(purchase::process))
        .route("/purchase/finalize", post(purchase::finalize))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            crate::auth::auth_middleware,
        ));

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
