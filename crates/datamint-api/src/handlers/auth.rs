//! Signup and login

use axum::{extract::State, Json};
use datamint_core::{models::PublicUser, AppError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

use crate::auth::jwt::issue_token;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;

const BCRYPT_COST: u32 = 12;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SignupRequest {
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub user: PublicUser,
}

#[utoipa::path(
    post,
    path = "/api/v0/auth/signup",
    tag = "auth",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "Account created", body = AuthResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    )
)]
pub async fn signup(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<SignupRequest>,
) -> Result<Json<AuthResponse>, HttpAppError> {
    request.validate().map_err(AppError::from)?;

    let password_hash =
        bcrypt::hash(&request.password, BCRYPT_COST).map_err(HttpAppError::from)?;

    let user = state
        .users
        .create_user(
            request.first_name.trim(),
            request.last_name.trim(),
            &request.email.to_lowercase(),
            &password_hash,
        )
        .await?;

    tracing::info!(user_id = %user.id, "new account created");

    let token = issue_token(
        state.config.jwt_secret(),
        user.id,
        &user.email,
        state.config.jwt_expiry_hours(),
    )?;

    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/v0/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = AuthResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<AuthResponse>, HttpAppError> {
    request.validate().map_err(AppError::from)?;

    let user = state
        .users
        .get_by_email(&request.email.to_lowercase())
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid email or password".to_string()))?;

    let valid =
        bcrypt::verify(&request.password, &user.password_hash).map_err(HttpAppError::from)?;
    if !valid {
        return Err(AppError::Unauthorized("Invalid email or password".to_string()).into());
    }

    state.users.touch_last_login(user.id).await?;

    let token = issue_token(
        state.config.jwt_secret(),
        user.id,
        &user.email,
        state.config.jwt_expiry_hours(),
    )?;

    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signup_request_validation() {
        let bad_email = SignupRequest {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "not-an-email".to_string(),
            password: "longenough".to_string(),
        };
        assert!(bad_email.validate().is_err());

        let short_password = SignupRequest {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            password: "short".to_string(),
        };
        assert!(short_password.validate().is_err());

        let ok = SignupRequest {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            password: "longenough".to_string(),
        };
        assert!(ok.validate().is_ok());
    }
}
