//! Authentication Middleware
//! Mission: Protect API endpoints with JWT validation

use crate::auth::{error::AuthError, jwt::JwtHandler};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};
use std::sync::Arc;

/// Resolve the caller's identity from `Authorization: Bearer ...`.
///
/// On success the [`IdentityContext`](crate::auth::models::IdentityContext)
/// is stored in the request extensions, where handlers pick it up with
/// `Extension<IdentityContext>`. A missing or invalid token ends the request.
pub async fn auth_middleware(
    State(jwt_handler): State<Arc<JwtHandler>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let bearer = req
        .headers()
        .typed_get::<Authorization<Bearer>>()
        .ok_or(AuthError::InvalidToken)?;

    let identity = jwt_handler.validate_token(bearer.token())?;

    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::models::{IdentityContext, UserRole};
    use axum::{
        body::Body,
        http::{header, Request as HttpRequest, StatusCode},
        middleware::from_fn_with_state,
        routing::get,
        Extension, Router,
    };
    use tower::ServiceExt;

    const SECRET: &str = "middleware-test-secret";

    fn app() -> Router {
        let jwt_handler = Arc::new(JwtHandler::new(SECRET.to_string()));
        Router::new()
            .route(
                "/whoami",
                get(|Extension(identity): Extension<IdentityContext>| async move {
                    identity.username
                }),
            )
            .route_layer(from_fn_with_state(jwt_handler, auth_middleware))
    }

    async fn call(auth_header: Option<&str>) -> Response {
        let mut builder = HttpRequest::builder().uri("/whoami");
        if let Some(value) = auth_header {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        app()
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_token_reaches_handler() {
        let token = JwtHandler::new(SECRET.to_string())
            .issue_token(
                &IdentityContext {
                    username: "test_user".to_string(),
                    id: 1,
                    role: UserRole::User,
                },
                chrono::Duration::minutes(5),
            )
            .unwrap();

        let response = call(Some(&format!("Bearer {token}"))).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"test_user");
    }

    #[tokio::test]
    async fn test_missing_header_rejected() {
        let response = call(None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_wrong_scheme_rejected() {
        let response = call(Some("Basic dXNlcjpwYXNz")).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_garbage_token_rejected() {
        let response = call(Some("Bearer not-a-jwt")).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
