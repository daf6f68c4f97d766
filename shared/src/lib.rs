//! Shared types for the Nova Hogar commerce platform
//!
//! Common types used across the server and tooling: the unified error
//! system, the API response envelope, and the domain models.

pub mod error;
pub mod models;

// Re-exports
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use serde::{Deserialize, Serialize};
