//! To-do API Endpoints
//! Mission: Owner-scoped CRUD for the caller's own to-dos

use crate::app::AppState;
use crate::auth::{authorize, Capability, IdentityContext};
use crate::errors::{require_positive_id, ApiError};
use crate::extract::{JsonBody, PathParam};
use crate::todos::{Todo, TodoRequest};
use axum::{
    extract::State,
    http::StatusCode,
    Extension, Json,
};

const TODO_NOT_FOUND: &str = "Todo not found.";

/// Load a to-do the caller owns.
///
/// Another user's to-do is reported as missing, never as forbidden, so
/// non-owners cannot tell which ids exist.
fn load_owned(state: &AppState, identity: &IdentityContext, todo_id: i64) -> Result<Todo, ApiError> {
    let todo_id = require_positive_id(todo_id, "todo_id")?;
    let todo = state
        .todos
        .get(todo_id)?
        .ok_or(ApiError::NotFound(TODO_NOT_FOUND))?;

    authorize(identity, Capability::Owner(todo.owner_id))
        .map_err(|_| ApiError::NotFound(TODO_NOT_FOUND))?;
    Ok(todo)
}

/// List own to-dos - GET /
pub async fn read_all(
    State(state): State<AppState>,
    Extension(identity): Extension<IdentityContext>,
) -> Result<Json<Vec<Todo>>, ApiError> {
    authorize(&identity, Capability::AnyAuthenticated)?;
    Ok(Json(state.todos.list_for_owner(identity.id)?))
}

/// GET /todo/:todo_id
pub async fn read_todo(
    State(state): State<AppState>,
    Extension(identity): Extension<IdentityContext>,
    PathParam(todo_id): PathParam<i64>,
) -> Result<Json<Todo>, ApiError> {
    load_owned(&state, &identity, todo_id).map(Json)
}

/// POST /todo
pub async fn create_todo(
    State(state): State<AppState>,
    Extension(identity): Extension<IdentityContext>,
    JsonBody(payload): JsonBody<TodoRequest>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    authorize(&identity, Capability::AnyAuthenticated)?;
    payload.validate()?;

    let todo = state.todos.create(identity.id, &payload)?;
    Ok((StatusCode::CREATED, Json(todo)))
}

/// PUT /todo/:todo_id
pub async fn update_todo(
    State(state): State<AppState>,
    Extension(identity): Extension<IdentityContext>,
    PathParam(todo_id): PathParam<i64>,
    JsonBody(payload): JsonBody<TodoRequest>,
) -> Result<StatusCode, ApiError> {
    payload.validate()?;
    let todo = load_owned(&state, &identity, todo_id)?;

    if !state.todos.update(todo.id, &payload)? {
        return Err(ApiError::NotFound(TODO_NOT_FOUND));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /todo/:todo_id
pub async fn delete_todo(
    State(state): State<AppState>,
    Extension(identity): Extension<IdentityContext>,
    PathParam(todo_id): PathParam<i64>,
) -> Result<StatusCode, ApiError> {
    let todo = load_owned(&state, &identity, todo_id)?;

    if !state.todos.delete(todo.id)? {
        return Err(ApiError::NotFound(TODO_NOT_FOUND));
    }
    Ok(StatusCode::NO_CONTENT)
}
