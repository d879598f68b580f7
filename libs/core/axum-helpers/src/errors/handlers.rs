use axum::{http::StatusCode, response::Response};

use super::{ErrorCode, ErrorResponse, error_response};

/// Fallback handler for unknown routes.
pub async fn not_found() -> Response {
    error_response(
        StatusCode::NOT_FOUND,
        ErrorResponse::new(ErrorCode::NotFound, "The requested resource was not found"),
    )
}

/// Fallback handler for known routes hit with an unsupported method.
pub async fn method_not_allowed() -> Response {
    error_response(
        StatusCode::METHOD_NOT_ALLOWED,
        ErrorResponse::new(
            ErrorCode::MethodNotAllowed,
            ErrorCode::MethodNotAllowed.default_message(),
        ),
    )
}
