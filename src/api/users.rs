//! User Profile Endpoints
//! Mission: Let callers read and edit their own account

use crate::app::AppState;
use crate::auth::{
    authorize,
    credentials::change_password as replace_password,
    models::{PasswordChangeRequest, UserResponse},
    AuthError, Capability, IdentityContext, User,
};
use crate::errors::ApiError;
use crate::extract::{JsonBody, PathParam};
use anyhow::Context;
use axum::{
    extract::State,
    http::StatusCode,
    Extension, Json,
};
use tracing::warn;

/// The caller's own account. A token for a deleted user no longer resolves.
fn load_self(state: &AppState, identity: &IdentityContext) -> Result<User, ApiError> {
    let user = state
        .users
        .get_user_by_id(identity.id)?
        .ok_or(AuthError::InvalidToken)?;
    authorize(identity, Capability::Owner(user.id))?;
    Ok(user)
}

/// GET /user/
pub async fn read_user(
    State(state): State<AppState>,
    Extension(identity): Extension<IdentityContext>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = load_self(&state, &identity)?;
    Ok(Json(UserResponse::from_user(&user)))
}

/// PUT /user/password
pub async fn change_password(
    State(state): State<AppState>,
    Extension(identity): Extension<IdentityContext>,
    JsonBody(payload): JsonBody<PasswordChangeRequest>,
) -> Result<StatusCode, ApiError> {
    if payload.new_password.chars().count() < 6 {
        return Err(ApiError::Validation(
            "new_password must be at least 6 characters".to_string(),
        ));
    }

    let user = load_self(&state, &identity)?;
    let users = state.users.clone();
    let user_id = user.id;
    let changed = tokio::task::spawn_blocking(move || {
        let cost = users.hash_cost();
        replace_password(
            users.as_ref(),
            &user,
            &payload.password,
            &payload.new_password,
            cost,
        )
    })
    .await
    .context("Password change task failed")??;

    if !changed {
        warn!(user_id, "Password change rejected: current password mismatch");
        return Err(ApiError::PasswordChangeFailed);
    }
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /user/phonenumber/:phone_number
pub async fn change_phone_number(
    State(state): State<AppState>,
    Extension(identity): Extension<IdentityContext>,
    PathParam(phone_number): PathParam<String>,
) -> Result<StatusCode, ApiError> {
    let user = load_self(&state, &identity)?;

    if !state.users.update_phone_number(user.id, &phone_number)? {
        return Err(AuthError::InvalidToken.into());
    }
    Ok(StatusCode::NO_CONTENT)
}
