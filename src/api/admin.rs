//! Admin API Endpoints
//! Mission: System-wide views and deletions, gated on the admin role

use crate::app::AppState;
use crate::auth::{authorize, models::UserResponse, Capability, IdentityContext};
use crate::errors::{require_positive_id, ApiError};
use crate::extract::PathParam;
use crate::todos::Todo;
use axum::{
    extract::State,
    http::StatusCode,
    Extension, Json,
};
use tracing::info;

/// List every to-do - GET /admin/todo
pub async fn read_all_todos(
    State(state): State<AppState>,
    Extension(identity): Extension<IdentityContext>,
) -> Result<Json<Vec<Todo>>, ApiError> {
    authorize(&identity, Capability::AdminOnly)?;
    Ok(Json(state.todos.list_all()?))
}

/// Delete any to-do - DELETE /admin/todo/:todo_id
pub async fn delete_todo(
    State(state): State<AppState>,
    Extension(identity): Extension<IdentityContext>,
    PathParam(todo_id): PathParam<i64>,
) -> Result<StatusCode, ApiError> {
    authorize(&identity, Capability::AdminOnly)?;
    let todo_id = require_positive_id(todo_id, "todo_id")?;

    if !state.todos.delete(todo_id)? {
        return Err(ApiError::NotFound("Todo not found."));
    }

    info!(admin = %identity.username, todo_id, "Admin deleted todo");
    Ok(StatusCode::NO_CONTENT)
}

/// List every user - GET /admin/users
pub async fn list_users(
    State(state): State<AppState>,
    Extension(identity): Extension<IdentityContext>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    authorize(&identity, Capability::AdminOnly)?;

    let users = state.users.list_users()?;
    Ok(Json(users.iter().map(UserResponse::from_user).collect()))
}

/// Delete any user and their to-dos - DELETE /admin/users/:user_id
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(identity): Extension<IdentityContext>,
    PathParam(user_id): PathParam<i64>,
) -> Result<StatusCode, ApiError> {
    authorize(&identity, Capability::AdminOnly)?;
    let user_id = require_positive_id(user_id, "user_id")?;

    // Don't allow deleting yourself
    if user_id == identity.id {
        return Err(ApiError::BadRequest("Cannot delete your own account"));
    }

    if !state.users.delete_user(user_id)? {
        return Err(ApiError::NotFound("User not found."));
    }

    info!(admin = %identity.username, user_id, "Admin deleted user");
    Ok(StatusCode::NO_CONTENT)
}
