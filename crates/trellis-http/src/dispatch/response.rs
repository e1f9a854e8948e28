use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON body of every response: `{"data": ...}` or `{"error": "..."}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Envelope {
    Data(Value),
    Error(String),
}

/// Outcome of dispatching one request
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchResponse {
    pub status: StatusCode,
    pub envelope: Envelope,
}

impl DispatchResponse {
    pub fn ok(data: Value) -> Self {
        Self {
            status: StatusCode::OK,
            envelope: Envelope::Data(data),
        }
    }

    pub fn error(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            envelope: Envelope::Error(message.into()),
        }
    }

    pub fn not_found() -> Self {
        Self::error(StatusCode::NOT_FOUND, "Not Found")
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::error(StatusCode::BAD_REQUEST, message)
    }

    pub fn payload_too_large() -> Self {
        Self::error(StatusCode::PAYLOAD_TOO_LARGE, "Payload Too Large")
    }

    pub fn internal_error() -> Self {
        Self::error(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// The payload of a successful response
    pub fn data(&self) -> Option<&Value> {
        match &self.envelope {
            Envelope::Data(data) => Some(data),
            Envelope::Error(_) => None,
        }
    }

    /// The envelope as a JSON value
    pub fn body(&self) -> Value {
        match &self.envelope {
            Envelope::Data(data) => serde_json::json!({ "data": data }),
            Envelope::Error(message) => serde_json::json!({ "error": message }),
        }
    }
}

impl IntoResponse for DispatchResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.envelope)).into_response()
    }
}
