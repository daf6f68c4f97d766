//! Server configuration

use rust_decimal::Decimal;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL
    pub database_url: String,
    /// HTTP port
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// JWT secret for customer authentication
    pub jwt_secret: String,
    /// SMTP server host
    pub smtp_host: String,
    /// SMTP server port
    pub smtp_port: u16,
    /// SMTP username (empty disables authentication)
    pub smtp_user: String,
    /// SMTP password
    pub smtp_pass: String,
    /// Sender address for outgoing mail
    pub mail_from: String,
    /// Company identity used in receipts and mail
    pub company: CompanyInfo,
    /// Tax rate applied to the post-coupon subtotal (0.16 = 16%)
    pub tax_rate: Decimal,
    /// Flat shipping charge per order
    pub shipping_flat: Decimal,
    /// Directory where rendered receipts are kept
    pub receipts_dir: String,
}

/// Company identity block for receipts and email bodies
#[derive(Debug, Clone)]
pub struct CompanyInfo {
    pub name: String,
    pub slogan: String,
    pub address: String,
    pub phone: String,
    pub email: String,
}

impl Config {
    /// Require a secret env var: must be set and non-empty in non-development environments.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        Ok(Self {
            database_url: std::env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set")?,
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            jwt_secret: Self::require_secret("JWT_SECRET", &environment)?,
            smtp_host: std::env::var("SMTP_HOST").unwrap_or_else(|_| "localhost".into()),
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(587),
            smtp_user: std::env::var("SMTP_USER").unwrap_or_default(),
            smtp_pass: std::env::var("SMTP_PASS").unwrap_or_default(),
            mail_from: std::env::var("MAIL_FROM")
                .unwrap_or_else(|_| "pedidos@novahogar.mx".into()),
            company: CompanyInfo {
                name: std::env::var("COMPANY_NAME").unwrap_or_else(|_| "Nova Hogar".into()),
                slogan: std::env::var("COMPANY_SLOGAN")
                    .unwrap_or_else(|_| "Diseño y Confort para tu Hogar".into()),
                address: std::env::var("COMPANY_ADDRESS")
                    .unwrap_or_else(|_| "Calle Ejemplo 123, Ciudad".into()),
                phone: std::env::var("COMPANY_PHONE").unwrap_or_else(|_| "0000000000".into()),
                email: std::env::var("COMPANY_EMAIL")
                    .unwrap_or_else(|_| "contacto@novahogar.mx".into()),
            },
            tax_rate: Self::parse_decimal("TAX_RATE", "0.16")?,
            shipping_flat: Self::parse_decimal("SHIPPING_FLAT", "150.00")?,
            receipts_dir: std::env::var("RECEIPTS_DIR").unwrap_or_else(|_| "./receipts".into()),
            environment,
        })
    }

    fn parse_decimal(name: &str, default: &str) -> Result<Decimal, BoxError> {
        let raw = std::env::var(name).unwrap_or_else(|_| default.into());
        raw.parse()
            .map_err(|_| format!("{name} must be a decimal number, got {raw:?}").into())
    }
}
