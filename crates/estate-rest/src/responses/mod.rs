//! API response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use estate_core::{EstateError, ErrorResponse};
use serde::Serialize;
use tracing::error;

/// Application error type for Axum.
#[derive(Debug)]
pub struct AppError(pub EstateError);

impl From<EstateError> for AppError {
    fn from(err: EstateError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            error!(error = %self.0, "Request failed");
        }

        (status, Json(ErrorResponse::from_error(&self.0))).into_response()
    }
}

/// Result type for Axum handlers.
pub type ApiResult<T> = Result<Json<T>, AppError>;

/// Wraps a value in a 200 response.
pub fn ok<T: Serialize>(data: T) -> ApiResult<T> {
    Ok(Json(data))
}

/// Wraps a value in a 201 response.
pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::CREATED, Json(data))
}

pub fn no_content() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// Turns an `Option` from a lookup into a 200 or a `NotFound` error.
pub fn found<T: Serialize>(
    data: Option<T>,
    resource_type: &'static str,
    id: impl ToString,
) -> ApiResult<T> {
    data.map(Json)
        .ok_or_else(|| AppError(EstateError::not_found(resource_type, id)))
}
