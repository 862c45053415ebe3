use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bookstore_shared::{error::RestError, models::ErrorResponse};
use thiserror::Error;

/// Wraps the shared error taxonomy so it can be rendered as an HTTP response
#[derive(Error, Debug)]
#[error(transparent)]
pub struct AppError(#[from] pub RestError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!("Internal server error: {}", self.0);
        } else {
            tracing::warn!("Request failed: status={}, message={}", status, self.0);
        }

        // The body mirrors the error's own status, message and kind
        (status, Json(ErrorResponse::from(&self.0))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
