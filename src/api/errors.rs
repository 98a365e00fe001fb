use crate::errors::Error;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;
use tracing::error;

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub message: String,
    pub code: u16,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiError({}, {})", self.code, self.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = axum::Json(self);
        (status, body).into_response()
    }
}

/// Helper function to create API errors
pub fn api_error(status: StatusCode, message: &str) -> ApiError {
    ApiError {
        message: message.to_string(),
        code: status.as_u16(),
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::InvalidInput(msg) => api_error(StatusCode::BAD_REQUEST, &msg),
            Error::Rejected(rule) => api_error(StatusCode::BAD_REQUEST, &rule.to_string()),
            Error::NotFound(msg) => api_error(StatusCode::NOT_FOUND, &msg),
            other => {
                error!("Request failed: {}", other);
                api_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        api_error(StatusCode::BAD_REQUEST, &rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        api_error(StatusCode::BAD_REQUEST, &rejection.body_text())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        api_error(StatusCode::BAD_REQUEST, &rejection.body_text())
    }
}
