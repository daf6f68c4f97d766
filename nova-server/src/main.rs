//! nova-server — Nova Hogar commerce backend
//!
//! Long-running service that:
//! - Manages the product catalog, per-user carts and coupons
//! - Processes checkouts into persisted orders (single transaction)
//! - Renders PDF purchase receipts and emails them to customers
//! - Provides a JWT-authenticated customer API

mod api;
mod auth;
mod checkout;
mod config;
mod db;
mod email;
mod error;
mod money;
mod receipt;
mod state;
mod util;

use config::Config;
use state::AppState;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nova_server=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    tracing::info!("Starting nova-server (env: {})", config.environment);

    // Initialize application state
    let state = AppState::new(&config).await?;

    // Build router
    let app = api::create_router(state);

    // Start HTTP server
    let http_addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&http_addr).await?;
    tracing::info!("nova-server HTTP listening on {http_addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
