use std::fmt::Display;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("bad request")]
    BadRequest,
    #[error("resource not found")]
    NotFound,
    #[error("method not allowed")]
    MethodNotAllowed,
    #[error("unprocessable")]
    Unprocessable,
    /// Used for an exhausted quiz: no eligible question remains.
    #[error("resource not supported")]
    NotSupported,
}

pub type ApiResponse<T> = Result<Json<T>, ApiError>;

#[derive(Serialize)]
struct ErrorEnvelope {
    success: bool,
    error: u16,
    message: String,
}

impl ApiError {
    pub fn status(self) -> StatusCode {
        match self {
            ApiError::BadRequest => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotSupported => StatusCode::NOT_IMPLEMENTED,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorEnvelope {
            success: false,
            error: status.as_u16(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {rejection}");
        ApiError::Unprocessable
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!("Rejected path: {rejection}");
        ApiError::NotFound
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!("Rejected query: {rejection}");
        ApiError::BadRequest
    }
}

/// Maps storage failures to the status an endpoint falls back to.
pub trait ResultExt<T> {
    fn or_api(self, fallback: ApiError) -> Result<T, ApiError>;
}

impl<T, E: Display> ResultExt<T> for Result<T, E> {
    fn or_api(self, fallback: ApiError) -> Result<T, ApiError> {
        self.map_err(|error| {
            tracing::error!(status = fallback.status().as_u16(), "Request failed: {error}");
            fallback
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_match_codes() {
        assert_eq!(ApiError::BadRequest.status().as_u16(), 400);
        assert_eq!(ApiError::NotFound.status().as_u16(), 404);
        assert_eq!(ApiError::MethodNotAllowed.status().as_u16(), 405);
        assert_eq!(ApiError::Unprocessable.status().as_u16(), 422);
        assert_eq!(ApiError::NotSupported.status().as_u16(), 501);
    }

    #[test]
    fn storage_errors_take_the_fallback() {
        let result: Result<(), sqlx::Error> = Err(sqlx::Error::RowNotFound);
        assert_eq!(result.or_api(ApiError::BadRequest), Err(ApiError::BadRequest));
    }
}
