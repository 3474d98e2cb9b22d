//! Authentication API Endpoints
//! Mission: Registration and password login

use crate::app::AppState;
use crate::auth::{
    credentials::verify_credentials,
    error::AuthError,
    models::{CreateUserRequest, LoginForm, TokenResponse, UserResponse},
};
use crate::db::is_unique_violation;
use crate::errors::ApiError;
use crate::extract::{FormBody, JsonBody};
use anyhow::Context;
use axum::{extract::State, http::StatusCode, Json};
use tracing::{info, warn};

/// Register endpoint - POST /auth/
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    if payload.username.trim().is_empty() {
        return Err(ApiError::Validation("username must not be empty".to_string()));
    }
    if payload.email.trim().is_empty() {
        return Err(ApiError::Validation("email must not be empty".to_string()));
    }
    if payload.password.is_empty() {
        return Err(ApiError::Validation("password must not be empty".to_string()));
    }

    let user = state.users.create_user(&payload).map_err(|e| {
        if e.downcast_ref::<rusqlite::Error>().is_some_and(is_unique_violation) {
            warn!("Registration rejected, duplicate: {}", payload.username);
            ApiError::Conflict("Username or email already exists")
        } else {
            ApiError::Internal(e)
        }
    })?;

    Ok((StatusCode::CREATED, Json(UserResponse::from_user(&user))))
}

/// Login endpoint - POST /auth/token (form encoded)
pub async fn login(
    State(state): State<AppState>,
    FormBody(form): FormBody<LoginForm>,
) -> Result<Json<TokenResponse>, ApiError> {
    info!("Login attempt: {}", form.username);

    // bcrypt is CPU bound; keep it off the async workers
    let users = state.users.clone();
    let username = form.username.clone();
    let verified = tokio::task::spawn_blocking(move || {
        verify_credentials(users.as_ref(), &username, &form.password)
    })
    .await
    .context("Credential check task failed")??;

    let Some(user) = verified else {
        warn!("Failed login attempt: {}", form.username);
        return Err(AuthError::InvalidCredentials.into());
    };

    let token = state
        .jwt_handler
        .issue_token(&user.identity(), state.token_ttl)?;

    info!(
        "Login successful: {} ({})",
        user.username,
        user.role.as_str()
    );

    Ok(Json(TokenResponse::bearer(token)))
}
