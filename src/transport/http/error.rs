//! Error envelope shared by every failing route.

use crate::transport::http::types::ErrorResponse;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

/// The only failures a client ever sees. Details stay in the server log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    BadRequest,
    NotFound,
    Unprocessable,
}

impl ApiError {
    pub fn status(self) -> StatusCode {
        match self {
            ApiError::BadRequest => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ApiError::BadRequest => "bad request",
            ApiError::NotFound => "resource not found",
            ApiError::Unprocessable => "unprocessable",
        }
    }

    /// Logs `err` and collapses it into the 422 catch-all.
    pub fn unprocessable(context: &str, err: impl std::fmt::Display) -> Self {
        tracing::warn!(error = %err, "{}", context);
        ApiError::Unprocessable
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (
            status,
            Json(ErrorResponse {
                success: false,
                error: status.as_u16(),
                message: self.message().to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_kind_has_a_fixed_status_and_message() {
        assert_eq!(ApiError::BadRequest.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::BadRequest.message(), "bad request");
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::NotFound.message(), "resource not found");
        assert_eq!(ApiError::Unprocessable.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(ApiError::Unprocessable.message(), "unprocessable");
    }

    #[test]
    fn into_response_keeps_status() {
        let response = ApiError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
