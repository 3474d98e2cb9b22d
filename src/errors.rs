//! API Errors
//! Mission: Map every handler failure to a status code and a `{"detail": ...}` body

use crate::auth::AuthError;
use axum::{
    extract::rejection::{FormRejection, JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

/// Handler error type
#[derive(Debug)]
pub enum ApiError {
    Auth(AuthError),
    NotFound(&'static str),
    Validation(String),
    Conflict(&'static str),
    BadRequest(&'static str),
    PasswordChangeFailed,
    Internal(anyhow::Error),
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::Auth(err)
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err)
    }
}

// Malformed bodies and path segments are validation failures, like
// out-of-range field values.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Auth(err) => write!(f, "{err}"),
            ApiError::NotFound(msg) | ApiError::Conflict(msg) | ApiError::BadRequest(msg) => {
                f.write_str(msg)
            }
            ApiError::Validation(msg) => f.write_str(msg),
            ApiError::PasswordChangeFailed => f.write_str("Error on password change"),
            ApiError::Internal(err) => write!(f, "Internal server error: {err:#}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::Auth(err) => return err.into_response(),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.to_string()),
            ApiError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg.to_string()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.to_string()),
            ApiError::PasswordChangeFailed => (
                StatusCode::UNAUTHORIZED,
                "Error on password change".to_string(),
            ),
            ApiError::Internal(err) => {
                error!("Request failed: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

/// Reject non-positive path ids the way the routes document them.
pub fn require_positive_id(id: i64, what: &str) -> Result<i64, ApiError> {
    if id > 0 {
        Ok(id)
    } else {
        Err(ApiError::Validation(format!("{what} must be greater than 0")))
    }
}
