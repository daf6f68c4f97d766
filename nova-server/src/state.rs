//! Application state for nova-server

use std::path::PathBuf;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::checkout::PricingConfig;
use crate::config::{CompanyInfo, Config};
use crate::email::Mailer;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool (bounded; excess callers queue)
    pub pool: PgPool,
    /// SMTP mailer for receipt delivery
    pub mailer: Mailer,
    /// JWT secret for customer authentication
    pub jwt_secret: String,
    /// Tax rate and flat shipping applied at checkout
    pub pricing: PricingConfig,
    /// Company identity for receipts and mail
    pub company: CompanyInfo,
    /// Directory for durable receipt copies
    pub receipts_dir: PathBuf,
}

impl AppState {
    /// Create a new AppState
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(&config.database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        let mailer = Mailer::new(config)?;

        let receipts_dir = PathBuf::from(&config.receipts_dir);
        std::fs::create_dir_all(&receipts_dir)?;

        Ok(Self {
            pool,
            mailer,
            jwt_secret: config.jwt_secret.clone(),
            pricing: PricingConfig {
                tax_rate: config.tax_rate,
                shipping_flat: config.shipping_flat,
            },
            company: config.company.clone(),
            receipts_dir,
        })
    }
}
