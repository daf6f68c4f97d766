//! Unified service-layer error type for nova-server
//!
//! `ServiceError` bridges the gap between infrastructure errors (`sqlx::Error`,
//! render/mail failures) and the API-layer error (`AppError`). It enables `?`
//! propagation without manual `.map_err(|e| { tracing::error!(...); ... })`
//! boilerplate in every handler.

use axum::response::IntoResponse;
use shared::error::{AppError, ErrorCode};
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Service-layer error
///
/// - `Db`: database/infrastructure errors (auto-logged, mapped to DatabaseError)
/// - `Render`: receipt document generation failures
/// - `Mail`: SMTP transport failures
/// - `App`: business-rule errors (transparent pass-through to the client)
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
    #[error("render error: {0}")]
    Render(BoxError),
    #[error("mail error: {0}")]
    Mail(BoxError),
    #[error(transparent)]
    App(#[from] AppError),
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::App(app_err) => app_err,
            ServiceError::Db(db_err) => {
                tracing::error!(error = %db_err, "Service database error");
                AppError::new(ErrorCode::DatabaseError)
            }
            ServiceError::Render(err) => {
                tracing::error!(error = %err, "Receipt render error");
                AppError::new(ErrorCode::ReceiptRenderFailed)
            }
            ServiceError::Mail(err) => {
                tracing::error!(error = %err, "Mail dispatch error");
                AppError::new(ErrorCode::EmailDeliveryFailed)
            }
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

/// Convenience type alias for service-layer results
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_error_maps_to_generic_envelope() {
        let err = ServiceError::Db(sqlx::Error::RowNotFound);
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::DatabaseError);
        // No sqlx detail leaks into the client-facing message
        assert_eq!(app.message, ErrorCode::DatabaseError.message());
    }

    #[test]
    fn test_app_error_passes_through() {
        let err = ServiceError::App(AppError::cart_empty());
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::CartEmpty);
    }

    #[test]
    fn test_render_and_mail_variants() {
        let err = ServiceError::Render("page overflow".into());
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::ReceiptRenderFailed);

        let err = ServiceError::Mail("connection refused".into());
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::EmailDeliveryFailed);
    }
}
