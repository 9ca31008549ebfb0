//! Extractors whose rejections surface as [`AppError`] instead of axum's plain-text defaults.

use axum::extract::{FromRequest, FromRequestParts};

use crate::errors::AppError;

/// `axum::Json` with malformed or mistyped bodies reported as `400` in the API error shape.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// `axum::extract::Path` with unparsable segments reported as `400`.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

/// Rejects ids that are not strictly positive; the store never assigns them.
pub fn positive_id(id: i64, what: &str) -> Result<i64, AppError> {
    if id > 0 {
        Ok(id)
    } else {
        Err(AppError::Validation(format!(
            "{what} must be a positive integer, got {id}"
        )))
    }
}
