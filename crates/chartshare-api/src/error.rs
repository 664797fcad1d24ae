//! Maps service errors to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

use chartshare_core::error::{AppError, ErrorKind};
use chartshare_service::ShareError;

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Share error category (`path`, `chart`, `quota`, `not_found`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Human-readable message.
    pub message: String,
}

/// Error returned by handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Infrastructure or authentication failure.
    #[error(transparent)]
    App(#[from] AppError),
    /// Share operation failure.
    #[error(transparent)]
    Share(#[from] ShareError),
}

fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Authentication => StatusCode::UNAUTHORIZED,
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::QuotaExceeded => StatusCode::FORBIDDEN,
        ErrorKind::ExternalService => StatusCode::BAD_GATEWAY,
        ErrorKind::Internal
        | ErrorKind::Database
        | ErrorKind::Configuration
        | ErrorKind::Serialization => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn app_error_response(err: AppError, error_type: Option<&str>) -> Response {
    let status = status_for(err.kind);
    let message = if err.kind.is_public() {
        err.message.clone()
    } else {
        error!(kind = %err.kind, error = ?err, "Request failed");
        "Internal server error".to_string()
    };

    let body = ApiErrorResponse {
        error: err.kind.to_string(),
        error_type: error_type.map(str::to_string),
        message,
    };
    (status, Json(body)).into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::App(err) => app_error_response(err, None),
            Self::Share(err) => {
                let error_type = err.error_type();
                app_error_response(err.into(), Some(error_type))
            }
        }
    }
}
