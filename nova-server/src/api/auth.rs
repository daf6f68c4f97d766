//! Authentication endpoints: register, login, me

use axum::{Extension, Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};
use shared::models::UserProfile;

use crate::auth::{UserIdentity, create_token};
use crate::db;
use crate::error::ServiceError;
use crate::state::AppState;
use crate::util::{hash_password, verify_password};

use super::ApiResult;

const MIN_PASSWORD_LEN: usize = 8;

/// POST /auth/register
#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "correo")]
    pub email: String,
    #[serde(rename = "contra")]
    pub password: String,
    #[serde(rename = "pais")]
    pub country: String,
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserProfile,
}

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ServiceError> {
    let name = req.name.trim();
    let email = req.email.trim().to_lowercase();
    let country = req.country.trim();

    if name.is_empty() || email.is_empty() || country.is_empty() {
        return Err(AppError::validation("nombre, correo and pais are required").into());
    }
    if !email.contains('@') {
        return Err(AppError::with_message(ErrorCode::InvalidFormat, "Invalid email").into());
    }
    if req.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::new(ErrorCode::PasswordTooShort).into());
    }

    if db::users::email_taken(&state.pool, &email).await? {
        return Err(AppError::new(ErrorCode::EmailAlreadyRegistered).into());
    }

    let password_hash = hash_password(&req.password).map_err(|e| {
        tracing::error!("Password hashing failed: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;

    let id = db::users::create(
        &state.pool,
        &db::users::NewUser {
            name,
            email: &email,
            password_hash: &password_hash,
            country,
        },
    )
    .await?;

    let token = create_token(id, &email, &state.jwt_secret).map_err(|e| {
        tracing::error!("JWT creation failed: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;

    tracing::info!(user_id = id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: UserProfile {
                id,
                name: name.to_string(),
                email,
                country: country.to_string(),
            },
        }),
    ))
}

/// POST /auth/login
#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(rename = "correo")]
    pub email: String,
    #[serde(rename = "contra")]
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<AuthResponse> {
    let email = req.email.trim().to_lowercase();
    let user = db::users::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(AppError::invalid_credentials)?;

    if !verify_password(&req.password, &user.password_hash) {
        return Err(AppError::invalid_credentials().into());
    }

    let token = create_token(user.id, &user.email, &state.jwt_secret).map_err(|e| {
        tracing::error!("JWT creation failed: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;

    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

/// GET /auth/me
pub async fn me(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
) -> ApiResult<UserProfile> {
    let user = db::users::find_by_id(&state.pool, identity.user_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;

    Ok(Json(user.into()))
}
