use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use service::auth::errors::AuthError;

/// HTTP-facing wrapper mapping the auth taxonomy onto status codes.
/// Client-input failures keep their message; internal faults are logged and
/// surfaced as a generic 500 body.
#[derive(Debug)]
pub struct ApiError(pub AuthError);

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self { Self(e) }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = match &err {
            AuthError::Validation(_)
            | AuthError::PasswordMismatch
            | AuthError::WeakPassword
            | AuthError::DuplicateEmail
            | AuthError::InvalidCredentials => StatusCode::BAD_REQUEST,
            AuthError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AuthError::InvalidToken => StatusCode::FORBIDDEN,
            AuthError::Hash(_) | AuthError::Token(_) | AuthError::Repository(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(code = err.code(), error = %err, "internal error");
            return (status, Json(serde_json::json!({"message": "Server error"}))).into_response();
        }
        (status, Json(serde_json::json!({"message": err.to_string()}))).into_response()
    }
}
