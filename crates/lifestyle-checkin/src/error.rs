use crate::checkin::CheckinServiceError;
use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("server error: {0}")]
    Server(#[from] axum::Error),
    #[error("invalid answers payload: {0}")]
    Payload(#[from] serde_json::Error),
    #[error("check-in error: {0}")]
    Checkin(#[from] CheckinServiceError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Payload(_) => StatusCode::BAD_REQUEST,
            AppError::Checkin(CheckinServiceError::Session(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Checkin(CheckinServiceError::Locked { .. })
            | AppError::Checkin(CheckinServiceError::AlreadyCompleted { .. }) => {
                StatusCode::CONFLICT
            }
            AppError::Checkin(CheckinServiceError::Repository(_)) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
