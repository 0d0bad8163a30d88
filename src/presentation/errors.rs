use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::application::dto::api_response::ApiResponse;
use crate::application::errors::ApplicationError;
use crate::domain::errors::DomainError;
use crate::infrastructure::logging::logger;

/// Message returned for every 500; details stay in the log.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> String {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg) => msg.clone(),
            ApiError::InternalServerError(_) => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }
}

impl From<ApplicationError> for ApiError {
    fn from(error: ApplicationError) -> Self {
        match error {
            ApplicationError::ValidationError(msg) => ApiError::BadRequest(msg),
            ApplicationError::NotFound(msg) => ApiError::NotFound(msg),
            ApplicationError::Conflict(msg) => ApiError::Conflict(msg),
            ApplicationError::Unauthorized(msg) => ApiError::Unauthorized(msg),
            ApplicationError::PermissionDenied(msg) => ApiError::Forbidden(msg),
            ApplicationError::InternalError(msg) => ApiError::InternalServerError(msg),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        ApplicationError::from(error).into()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::InternalServerError(detail) = &self {
            logger::error(&format!("Request failed: {}", detail));
        }

        let body = ApiResponse::failure(self.public_message());
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_failures_hide_details() {
        let error = ApiError::from(DomainError::InternalError("disk on fire".to_string()));

        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.public_message(), INTERNAL_ERROR_MESSAGE);
    }

    #[test]
    fn application_errors_map_to_statuses() {
        let cases = [
            (ApplicationError::ValidationError("v".into()), StatusCode::BAD_REQUEST),
            (ApplicationError::NotFound("n".into()), StatusCode::NOT_FOUND),
            (ApplicationError::Conflict("c".into()), StatusCode::CONFLICT),
            (ApplicationError::Unauthorized("u".into()), StatusCode::UNAUTHORIZED),
            (ApplicationError::PermissionDenied("p".into()), StatusCode::FORBIDDEN),
        ];

        for (error, status) in cases {
            assert_eq!(ApiError::from(error).status(), status);
        }
    }
}
