//! Error types for liveline-server
//!
//! Request failures all surface as the same generic 500 body; the cause is
//! only logged.

use std::any::Any;

use axum::body::Body;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Body returned for every failed request
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

/// Request-level error with automatic HTTP status mapping
#[derive(Error, Debug)]
pub enum ApiError {
    /// Query, pool checkout, or row decoding failed (500, logged)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!("Error: {}", self);
        internal_error_response()
    }
}

/// 500 with the generic JSON error body
pub fn internal_error_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": INTERNAL_ERROR_MESSAGE })),
    )
        .into_response()
}

/// Converts a handler panic into the generic 500 response.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    tracing::error!("Handler panicked: {}", detail);

    internal_error_response()
}

/// Server startup/runtime error
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ServerResult<T> = Result<T, ServerError>;
