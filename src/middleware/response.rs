use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Uniform response body: `{ status, message?, data?, error? }`.
///
/// `status` always equals the HTTP status the response is sent with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Envelope {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status: status.as_u16(),
            message: None,
            data: None,
            error: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

/// Successful response carrying data
#[derive(Debug)]
pub struct ApiResponse {
    pub data: Value,
    pub status_code: StatusCode,
    pub message: Option<String>,
}

impl ApiResponse {
    /// Create a successful API response with default 200 status
    pub fn success(data: Value) -> Self {
        Self::with_status(data, StatusCode::OK)
    }

    /// Create an API response with custom status code
    pub fn with_status(data: Value, status_code: StatusCode) -> Self {
        Self {
            data,
            status_code,
            message: None,
        }
    }

    /// Create a 201 Created response
    pub fn created(data: Value) -> Self {
        Self::with_status(data, StatusCode::CREATED)
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        let mut envelope = Envelope::new(self.status_code).with_data(self.data);
        envelope.message = self.message;
        envelope.into_response()
    }
}

pub type ApiResult = Result<ApiResponse, crate::error::ApiError>;
