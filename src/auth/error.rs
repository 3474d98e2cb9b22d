//! Authentication Errors
//! Mission: One rejection shape for every failed auth decision

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Auth error kinds.
///
/// All three surface as 401. `Forbidden` is deliberately not a 403: a
/// caller lacking the role is answered the same way as a caller with no
/// valid token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown username or wrong password
    InvalidCredentials,
    /// Missing, malformed, tampered or expired token, or a missing claim
    InvalidToken,
    /// Role or ownership check failed
    Forbidden,
}

impl AuthError {
    pub fn message(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials | AuthError::InvalidToken => "Could not validate user.",
            AuthError::Forbidden => "Authentication Failed.",
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for AuthError {}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            [(header::WWW_AUTHENTICATE, "Bearer")],
            Json(json!({ "detail": self.message() })),
        )
            .into_response()
    }
}
