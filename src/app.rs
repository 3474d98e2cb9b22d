//! Application State & Router
//! Mission: Wire stores, token handler and routes into one axum app

use crate::api::{admin, todos, users};
use crate::auth::{api as auth_api, auth_middleware, JwtHandler, UserStore};
use crate::db::Database;
use crate::middleware::request_logging;
use crate::todos::TodoStore;
use axum::{
    middleware,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserStore>,
    pub todos: Arc<TodoStore>,
    pub jwt_handler: Arc<JwtHandler>,
    pub token_ttl: chrono::Duration,
}

impl AppState {
    pub fn new(db: Database, jwt_secret: String, token_ttl: chrono::Duration, hash_cost: u32) -> Self {
        Self {
            users: Arc::new(UserStore::new(db.clone(), hash_cost)),
            todos: Arc::new(TodoStore::new(db)),
            jwt_handler: Arc::new(JwtHandler::new(jwt_secret)),
            token_ttl,
        }
    }
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "Healthy" }))
}

/// Build the complete HTTP application
pub fn build_router(state: AppState) -> Router {
    // Public routes: health, registration, login
    let public_routes = Router::new()
        .route("/healthy", get(health_check))
        .route("/auth", post(auth_api::create_user))
        .route("/auth/", post(auth_api::create_user))
        .route("/auth/token", post(auth_api::login))
        .with_state(state.clone());

    // Protected routes: every handler receives an IdentityContext extension
    let protected_routes = Router::new()
        .route("/", get(todos::read_all))
        .route("/todo", post(todos::create_todo))
        .route(
            "/todo/:todo_id",
            get(todos::read_todo)
                .put(todos::update_todo)
                .delete(todos::delete_todo),
        )
        .route("/admin/todo", get(admin::read_all_todos))
        .route("/admin/todo/:todo_id", delete(admin::delete_todo))
        .route("/admin/users", get(admin::list_users))
        .route("/admin/users/:user_id", delete(admin::delete_user))
        .route("/user", get(users::read_user))
        .route("/user/", get(users::read_user))
        .route("/user/password", put(users::change_password))
        .route(
            "/user/phonenumber/:phone_number",
            put(users::change_phone_number),
        )
        .route_layer(middleware::from_fn_with_state(
            state.jwt_handler.clone(),
            auth_middleware,
        ))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(middleware::from_fn(request_logging))
        .layer(CorsLayer::permissive())
}
