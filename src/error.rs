// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse};

use crate::config::config;
use crate::database::DatabaseError;
use crate::middleware::Envelope;

/// Message carried in place of the real error when details are not exposed
const REDACTED_DETAIL: &str = "An unexpected error occurred";

/// HTTP API error with appropriate status codes and client-facing messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),

    // 404 Not Found
    NotFound(String),

    // 405 Method Not Allowed
    MethodNotAllowed(String),

    // 500 Internal Server Error
    InternalServerError { message: String, detail: String },

    // 503 Service Unavailable
    ServiceUnavailable { message: String, detail: String },
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::InternalServerError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::MethodNotAllowed(msg) => msg,
            ApiError::InternalServerError { message, .. } => message,
            ApiError::ServiceUnavailable { message, .. } => message,
        }
    }

    /// Underlying failure text for server-side errors
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::InternalServerError { detail, .. } | ApiError::ServiceUnavailable { detail, .. } => {
                Some(detail)
            }
            _ => None,
        }
    }

    /// Convert to the response envelope
    pub fn to_envelope(&self, expose_detail: bool) -> Envelope {
        let envelope = Envelope::new(self.status_code()).with_message(self.message());
        match self.detail() {
            Some(detail) if expose_detail => envelope.with_error(detail),
            Some(_) => envelope.with_error(REDACTED_DETAIL),
            None => envelope,
        }
    }
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn method_not_allowed(message: impl Into<String>) -> Self {
        ApiError::MethodNotAllowed(message.into())
    }

    pub fn internal_server_error(detail: impl Into<String>) -> Self {
        ApiError::InternalServerError {
            message: "Internal server error".to_string(),
            detail: detail.into(),
        }
    }

    pub fn service_unavailable(message: impl Into<String>, detail: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable {
            message: message.into(),
            detail: detail.into(),
        }
    }
}

// Every store failure is unexpected from the handler's point of view
impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        ApiError::internal_server_error(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.detail() {
            Some(detail) => write!(f, "{}: {}", self.message(), detail),
            None => write!(f, "{}", self.message()),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::warn!(status = status.as_u16(), "{}", self.message());
        }
        self.to_envelope(config().api.expose_error_details).into_response()
    }
}
