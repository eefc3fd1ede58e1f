//! HTTP mapping for domain errors.
//!
//! Handlers return `Result<_, ApiError>`; every error leaves the server as
//! `{ "success": false, "error": "<message>" }` with a status derived from the
//! `StaybookError` variant.

use std::fmt;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use staybook_domain::StaybookError;

/// Error returned by every handler.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    source: Option<StaybookError>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into(), source: None }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.status.as_u16(), self.message)
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Status code for a domain error.
pub fn status_for(err: &StaybookError) -> StatusCode {
    match err {
        StaybookError::InvalidInput(_) | StaybookError::Unavailable(_) => StatusCode::BAD_REQUEST,
        StaybookError::Auth(_) => StatusCode::UNAUTHORIZED,
        StaybookError::Forbidden(_) => StatusCode::FORBIDDEN,
        StaybookError::NotFound(_) => StatusCode::NOT_FOUND,
        StaybookError::Config(_)
        | StaybookError::Database(_)
        | StaybookError::Network(_)
        | StaybookError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<StaybookError> for ApiError {
    fn from(err: StaybookError) -> Self {
        Self { status: status_for(&err), message: err.message().to_string(), source: Some(err) }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    success: bool,
    error: &'a str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            match &self.source {
                Some(source) => tracing::error!(
                    status = %self.status,
                    kind = source.label(),
                    error = %source,
                    "request failed"
                ),
                None => tracing::error!(status = %self.status, message = %self.message, "request failed"),
            }
        }

        let body = ErrorBody { success: false, error: &self.message };
        (self.status, Json(body)).into_response()
    }
}
