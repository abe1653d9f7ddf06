//! HTTP error mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use formcheck_core::Error;
use serde_json::json;
use thiserror::Error as ThisError;

/// Error returned by every handler
#[derive(Debug, ThisError)]
pub enum ApiError {
    #[error(transparent)]
    Core(#[from] Error),

    /// Request could not be parsed; the message is sent as-is
    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Core(err) => match err {
                Error::InvalidInput(_) | Error::EmptyPose => StatusCode::BAD_REQUEST,
                Error::NotFound(_) => StatusCode::NOT_FOUND,
                Error::Generation(_) => StatusCode::BAD_GATEWAY,
                Error::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
                Error::UnknownPoseType(_)
                | Error::ReferenceData(_)
                | Error::Config(_)
                | Error::Serialization(_)
                | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    /// Message safe to show to the client
    fn public_message(&self) -> String {
        match self {
            Self::BadRequest(msg) => msg.clone(),
            Self::Core(err) => match err {
                Error::InvalidInput(msg) | Error::NotFound(msg) => msg.clone(),
                Error::EmptyPose => err.to_string(),
                Error::Generation(_) => "Feedback generation failed".to_string(),
                Error::Timeout { .. } => "Feedback generation timed out".to_string(),
                _ => "Internal server error".to_string(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!("Request failed with {}: {}", status, self);
        } else {
            tracing::debug!("Rejected request with {}: {}", status, self);
        }

        (status, Json(json!({ "error": self.public_message() }))).into_response()
    }
}
