//! Request extractors whose rejections render as `ApiError`.
//!
//! axum's own `Json`, `Path` and `Form` reply with plain-text bodies; these
//! wrappers route the same failures through `ApiError` so every error body
//! is `{"detail": ...}`.

use crate::errors::ApiError;
use axum::extract::{FromRequest, FromRequestParts};

/// JSON request body
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

/// URL-encoded form body
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Form), rejection(ApiError))]
pub struct FormBody<T>(pub T);

/// Path parameters
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct PathParam<T>(pub T);
