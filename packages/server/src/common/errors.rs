use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// API error taxonomy for the booking platform
///
/// Each variant maps to an HTTP class so that callers (and the payment
/// gateway's webhook retrier) can tell terminal failures from retryable ones:
/// validation and not-found are the caller's fault, gateway and store
/// failures are transient and safe to retry.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Conflict(String),

    #[error("Payment gateway error: {0}")]
    Gateway(#[source] mollie::MollieError),

    #[error("Storage error: {0}")]
    Store(#[source] anyhow::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Classify an error bubbling out of a store call as retryable
    pub fn store(err: anyhow::Error) -> Self {
        ApiError::Store(err)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Gateway(_) => StatusCode::BAD_GATEWAY,
            ApiError::Store(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<mollie::MollieError> for ApiError {
    fn from(err: mollie::MollieError) -> Self {
        match err {
            // The gateway not knowing the id is a caller problem, not an outage
            mollie::MollieError::NotFound => ApiError::NotFound("payment"),
            other => ApiError::Gateway(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(status = %status, error = %self, "request failed");
        } else {
            tracing::debug!(status = %status, error = %self, "request rejected");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
